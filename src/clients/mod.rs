pub mod generation;
pub mod mailer;
pub mod synthesis;
