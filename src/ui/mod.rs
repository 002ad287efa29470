/// UI module exports
pub mod toast;
