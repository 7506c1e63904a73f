pub mod shutdown;

pub use shutdown::{cancel_on_signal, wait_for_shutdown};
