mod assembly_ai_client;

pub use assembly_ai_client::AssemblyAiClient;
