mod openai_chat_client;

pub use openai_chat_client::OpenAiChatClient;
