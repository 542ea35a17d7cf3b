pub mod catalog;
pub mod chat;
pub mod conversation;
pub mod domain;
pub mod outcome;
pub mod ports;
pub mod profile;
pub mod seed;
pub mod stats;
pub mod store;

pub use chat::ChatAssistant;
pub use conversation::{ChatMessage, ChatTranscript, Conversation, Sender};
pub use domain::{CalendarEvent, EventKind, Item, ItemType, Loan, Reservation, ReservationStatus, Review, User};
pub use outcome::{Notice, NoticeKind, StoreOutcome};
pub use ports::{ChangeListener, ChatBackend, ChatReply, ChatSession, ChatSessionConfig, Clock, PortError, PortResult};
pub use profile::ProfileSummary;
pub use stats::AttendanceStats;
pub use store::{LibrarySnapshot, LibraryStore, StoreChange, StoreError};
