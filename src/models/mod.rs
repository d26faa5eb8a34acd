pub mod inquiry;
pub mod record;

pub use inquiry::{Inquiry, NewInquiryRequest};
pub use record::{DailyRecord, PrayerStatus, StudentRank, UpsertRecordRequest};
