use anyhow::Result;
use practitioner_registry::config::open_repository;
use practitioner_registry::core::PractitionerRepository;
use practitioner_registry::{
    Command, CommandDispatcher, CommandOutcome, JsonFileRepository, PractitionerService,
    RegistryConfig, RegistryError,
};
use tempfile::TempDir;

fn command(json: serde_json::Value) -> Result<Command> {
    Ok(serde_json::from_value(json)?)
}

#[tokio::test]
async fn test_json_commands_against_file_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_file = temp_dir.path().join("registry.json");

    let repository = JsonFileRepository::open(&data_file).await?;
    let dispatcher = CommandDispatcher::new(PractitionerService::new(repository));

    let outcome = dispatcher
        .dispatch(command(serde_json::json!({
            "command": "register",
            "fullName": "Ana Ruiz",
            "professionalDocument": "MD-1001",
            "specialty": "Pediatrics",
            "contactPhone": "555-0100",
            "address": {"city": "Lima"}
        }))?)
        .await?;
    let id = match outcome {
        CommandOutcome::Registered(receipt) => receipt.id,
        other => anyhow::bail!("unexpected outcome {:?}", other),
    };

    dispatcher
        .dispatch(command(serde_json::json!({
            "command": "update",
            "id": id,
            "address": {"district": "Barranco"}
        }))?)
        .await?;

    let outcome = dispatcher
        .dispatch(command(serde_json::json!({"command": "list"}))?)
        .await?;
    let rendered = serde_json::to_value(&outcome)?;
    assert_eq!(rendered["outcome"], "page");
    assert_eq!(rendered["data"]["pageSize"], 5);
    assert_eq!(rendered["data"]["totalElements"], 1);
    assert_eq!(rendered["data"]["content"][0]["fullName"], "Ana Ruiz");
    assert!(rendered["data"]["content"][0].get("address").is_none());

    // reopen from disk and check the update landed
    drop(dispatcher);
    let mut config = RegistryConfig::default();
    config.use_data_file(data_file.to_string_lossy());
    let repository = open_repository(&config).await?;
    let stored = repository.find_by_id(id).await?;
    assert_eq!(stored.address().city.as_deref(), Some("Lima"));
    assert_eq!(stored.address().district.as_deref(), Some("Barranco"));

    let dispatcher = CommandDispatcher::new(PractitionerService::new(repository));
    for _ in 0..2 {
        let outcome = dispatcher.dispatch(Command::Deactivate { id }).await?;
        assert_eq!(outcome, CommandOutcome::Done);
    }

    let outcome = dispatcher
        .dispatch(command(serde_json::json!({"command": "list", "pageNumber": 0, "pageSize": 5}))?)
        .await?;
    match outcome {
        CommandOutcome::Page(page) => assert!(page.content.is_empty()),
        other => anyhow::bail!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_rejected_commands_leave_store_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_file = temp_dir.path().join("registry.json");
    let dispatcher =
        CommandDispatcher::new(PractitionerService::new(JsonFileRepository::open(&data_file).await?));

    let err = dispatcher
        .dispatch(command(serde_json::json!({
            "command": "register",
            "fullName": "   ",
            "professionalDocument": "MD-1001",
            "specialty": "Pediatrics"
        }))?)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::ValidationError { ref field, .. } if field == "fullName"));

    let err = dispatcher
        .dispatch(command(serde_json::json!({
            "command": "register",
            "fullName": "Ana Ruiz",
            "professionalDocument": "MD_1001",
            "specialty": "Pediatrics"
        }))?)
        .await
        .unwrap_err();
    assert!(
        matches!(err, RegistryError::ValidationError { ref field, .. } if field == "professionalDocument")
    );

    let err = dispatcher
        .dispatch(command(serde_json::json!({"command": "deactivate", "id": 12}))?)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFoundError { .. }));

    assert!(!data_file.exists());
    Ok(())
}
