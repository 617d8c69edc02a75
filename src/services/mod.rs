pub mod broadcast;

pub use broadcast::UpdateBroadcaster;
