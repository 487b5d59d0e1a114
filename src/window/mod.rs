pub mod deferred;
pub mod resize_governor;

pub use deferred::{DeferredQueue, TaskId};
pub use resize_governor::{
    EventOrigin, Geometry, ResizeEvent, ResizeGovernor, ResizeLock, SETTLE_DELAY,
};
