//! Assistant wiring: persona instructions and the canonical tool registry.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AssistantConfig, TrainsConfig, ZephyrConfig};
use crate::contacts::NicknameResolver;
use crate::error::Result;
use crate::tools::{
    CalendarService, CreateTaskTool, CurrentDateTimeTool, DeleteTaskTool, GetContactByIdTool,
    GetContactByNicknameTool, ListNicknamesTool, ListTaskListsTool, ListTasksTool,
    ListUnreadMailTool, MailService, McpTrainService, NextTrainTool, ScheduleEventTool,
    SendMailTool, TaskService, ToolMode, ToolRegistry, TrainService, UnconfiguredService,
    UpdateTaskTool, UpcomingEventsTool,
};

/// Build the system instructions handed to the language model.
pub fn instructions(config: &AssistantConfig) -> String {
    format!(
        "You are a helpful voice assistant called {name}.\n\
         Answer in {language} unless the user asks otherwise.\n\
         The user talks to you by voice, even if the conversation reaches you as text, \
         so names may be misheard.\n\
         Keep answers short and plain: no lists, markdown, emojis or symbols.\n\
         Be friendly and a little playful.\n\
         When the user names a person, resolve the name with get_contact_info_by_nickname \
         before acting on it. If no contact matches, say so and ask for the name again.\n\
         Call get_current_datetime before working with relative dates such as tomorrow.",
        name = config.name,
        language = config.language,
    )
}

/// External collaborators behind the non-contact tools.
#[derive(Clone)]
pub struct Services {
    /// Mail provider.
    pub mail: Arc<dyn MailService>,
    /// Calendar provider.
    pub calendar: Arc<dyn CalendarService>,
    /// Task-list provider.
    pub tasks: Arc<dyn TaskService>,
    /// Train timetable lookup.
    pub trains: Arc<dyn TrainService>,
}

impl Services {
    /// Unconfigured mail, calendar and tasks plus the MCP train client.
    pub fn unconfigured(trains: &TrainsConfig) -> Self {
        Self {
            mail: Arc::new(UnconfiguredService),
            calendar: Arc::new(UnconfiguredService),
            tasks: Arc::new(UnconfiguredService),
            trains: Arc::new(McpTrainService::new(
                trains.endpoint.clone(),
                Duration::from_secs(trains.timeout_secs),
            )),
        }
    }
}

/// Register every tool the assistant exposes.
pub fn build_registry(
    resolver: &NicknameResolver,
    services: &Services,
    mode: ToolMode,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new(mode);

    registry.register(Arc::new(GetContactByNicknameTool::new(resolver.clone())));
    registry.register(Arc::new(GetContactByIdTool::new(resolver.clone())));
    registry.register(Arc::new(ListNicknamesTool::new(resolver.clone())));

    registry.register(Arc::new(SendMailTool::new(Arc::clone(&services.mail))));
    registry.register(Arc::new(ListUnreadMailTool::new(Arc::clone(&services.mail))));

    registry.register(Arc::new(ScheduleEventTool::new(Arc::clone(&services.calendar))));
    registry.register(Arc::new(UpcomingEventsTool::new(Arc::clone(&services.calendar))));

    registry.register(Arc::new(ListTaskListsTool::new(Arc::clone(&services.tasks))));
    registry.register(Arc::new(ListTasksTool::new(Arc::clone(&services.tasks))));
    registry.register(Arc::new(CreateTaskTool::new(Arc::clone(&services.tasks))));
    registry.register(Arc::new(UpdateTaskTool::new(Arc::clone(&services.tasks))));
    registry.register(Arc::new(DeleteTaskTool::new(Arc::clone(&services.tasks))));

    registry.register(Arc::new(NextTrainTool::new(Arc::clone(&services.trains))));
    registry.register(Arc::new(CurrentDateTimeTool::new()));

    registry
}

/// A fully wired assistant: validated config, resolver and tool registry.
pub struct Assistant {
    config: ZephyrConfig,
    resolver: NicknameResolver,
    registry: Arc<ToolRegistry>,
}

impl Assistant {
    /// Validate `config` and wire it to `services`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or its contacts are invalid.
    pub fn with_services(config: ZephyrConfig, services: &Services) -> Result<Self> {
        let directory = config.validate()?;
        let resolver =
            NicknameResolver::with_threshold(Arc::new(directory), config.resolver.threshold)?;
        let registry = build_registry(&resolver, services, config.assistant.tool_mode);

        tracing::info!(
            contacts = resolver.directory().len(),
            threshold = resolver.default_threshold(),
            tools = registry.list_available().len(),
            "assistant wired"
        );

        Ok(Self {
            config,
            resolver,
            registry: Arc::new(registry),
        })
    }

    /// Validate `config` and wire it to unconfigured services.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or its contacts are invalid.
    pub fn from_config(config: ZephyrConfig) -> Result<Self> {
        let services = Services::unconfigured(&config.trains);
        Self::with_services(config, &services)
    }

    /// The configuration the assistant was built from.
    pub fn config(&self) -> &ZephyrConfig {
        &self.config
    }

    /// The nickname resolver.
    pub fn resolver(&self) -> &NicknameResolver {
        &self.resolver
    }

    /// Shared handle to the tool registry.
    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    /// System instructions for the language model.
    pub fn instructions(&self) -> String {
        instructions(&self.config.assistant)
    }
}
