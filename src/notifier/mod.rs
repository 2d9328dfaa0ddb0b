pub mod push;
pub mod scan;
pub mod scheduler;
pub mod store;

pub use push::{PushClient, PushOutcome, PushPayload, WebPushSender};
pub use scan::{run_scan, NotificationEvent, NotifierStore, LOOKAHEAD_MINUTES};
pub use scheduler::start_notifier;
pub use store::PgNotifierStore;
