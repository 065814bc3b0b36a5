mod store;

pub use store::OverlayStore;
