/// Browser implementations of the host-page seams
pub mod button;
pub mod dom;
pub mod fetch;
pub mod observer;
pub mod timers;
