pub mod log_notifier;
