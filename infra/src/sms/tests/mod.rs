#[cfg(feature = "twilio-sms")]
mod twilio_tests;
