use crate::core::service::PractitionerService;
use crate::core::{
    ListQuery, Page, PractitionerId, PractitionerListView, PractitionerRepository,
    RegisterPayload, RegistrationReceipt, UpdatePayload,
};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// A typed request, as produced by whatever transport sits in front of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    Register(RegisterPayload),
    List(ListQuery),
    Update(UpdatePayload),
    Deactivate { id: PractitionerId },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::List(_) => "list",
            Command::Update(_) => "update",
            Command::Deactivate { .. } => "deactivate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "camelCase")]
pub enum CommandOutcome {
    Registered(RegistrationReceipt),
    Page(Page<PractitionerListView>),
    Done,
}

pub struct CommandDispatcher<R: PractitionerRepository> {
    service: PractitionerService<R>,
}

impl<R: PractitionerRepository> CommandDispatcher<R> {
    pub fn new(service: PractitionerService<R>) -> Self {
        Self { service }
    }

    pub async fn dispatch(&self, command: Command) -> Result<CommandOutcome> {
        tracing::debug!("Dispatching {} command", command.name());

        match command {
            Command::Register(payload) => {
                Ok(CommandOutcome::Registered(self.service.register(payload).await?))
            }
            Command::List(query) => Ok(CommandOutcome::Page(self.service.list(&query).await?)),
            Command::Update(payload) => {
                self.service.update(payload).await?;
                Ok(CommandOutcome::Done)
            }
            Command::Deactivate { id } => {
                self.service.deactivate(id).await?;
                Ok(CommandOutcome::Done)
            }
        }
    }
}
