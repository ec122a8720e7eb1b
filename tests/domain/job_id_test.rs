use transcript_gateway::domain::JobId;

#[test]
fn given_provider_id_when_parsing_then_keeps_value_verbatim() {
    let id = JobId::parse("5551722-f677-48a4-a8b6").unwrap();
    assert_eq!(id.as_str(), "5551722-f677-48a4-a8b6");
    assert_eq!(id.to_string(), "5551722-f677-48a4-a8b6");
}

#[test]
fn given_blank_id_when_parsing_then_returns_none() {
    assert!(JobId::parse("").is_none());
    assert!(JobId::parse("   ").is_none());
}
