mod notification_request;

pub use notification_request::*;
