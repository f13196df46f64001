pub mod amount;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod ids;
pub mod schedule;
pub mod service;
pub mod store;
pub mod time;
pub mod types;
pub mod validation;

// re-export key types
pub use amount::{Amount, Currency};
pub use config::DonationConfig;
pub use errors::{DonationError, ErrorKind, Result};
pub use gateway::{PaymentIntent, PaymentIntentGateway, PaymentIntentRequest};
pub use ids::{IdGenerator, SortableIdGenerator};
pub use schedule::{compute_payment_schedule, PaymentSchedule, PaymentScheduleEntry};
pub use service::{DonationReceipt, DonationService, FutureCharge};
pub use store::{EntityKind, InMemoryRecordStore, RecordStore, RecordStoreExt};
pub use types::{
    Donation, DonationId, DonationRequest, Fundraiser, FundraiserId, Payment, PaymentId,
    PaymentMethod, PaymentStatus, RecurrenceFrequency,
};
pub use validation::validate_donation;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use uuid::Uuid;
