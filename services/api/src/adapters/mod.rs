pub mod change_log;
pub mod chat_llm;
pub mod clock;

pub use change_log::TracingChangeListener;
pub use chat_llm::{OpenAiChatBackend, OpenAiChatSession};
pub use clock::SystemClock;
