
mod snapshot_events;
