pub mod heat_pump_snapshot_sync;
