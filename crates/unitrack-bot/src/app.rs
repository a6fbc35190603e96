//! Bot construction and the gateway run loop.

use std::future::Future;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::info;

use unitrack_auth::AuthorizationChecker;
use unitrack_core::config::DiscordConfig;
use unitrack_core::error::AppError;
use unitrack_database::repositories::AdminRoleRepository;
use unitrack_service::{AdminRoleService, TransferWorkflow, UnicycleService};

use crate::commands;
use crate::directory::DiscordDirectory;
use crate::error::BotError;
use crate::framework;
use crate::state::Data;

/// View Channels + Send Messages + Manage Roles.
pub const INVITE_PERMISSIONS: u64 = 1024 + 2048 + 268_435_456;

/// Services wired by the binary before the gateway connects.
#[derive(Debug, Clone)]
pub struct Services {
    /// Unicycle lifecycle.
    pub unicycles: UnicycleService,
    /// Admin role management.
    pub admin_roles: AdminRoleService,
    /// Custody transfers.
    pub transfers: TransferWorkflow,
    /// Admin roles, consulted by the authorization checker.
    pub admin_role_repo: Arc<AdminRoleRepository>,
}

/// The Discord bot.
#[derive(Debug)]
pub struct Bot {
    config: DiscordConfig,
    services: Services,
}

impl Bot {
    /// Creates a bot that has not connected yet.
    pub fn new(config: DiscordConfig, services: Services) -> Self {
        Self { config, services }
    }

    /// Connect and serve commands until `shutdown` completes.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send) -> Result<(), BotError> {
        let Self { config, services } = self;
        if config.token.trim().is_empty() {
            return Err(AppError::configuration("Discord token is not configured").into());
        }
        let dev_guild = config.dev_guild_id.map(serenity::GuildId::new);

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: commands::all(),
                on_error: |error| Box::pin(framework::on_error(error)),
                pre_command: |ctx| Box::pin(framework::pre_command(ctx)),
                post_command: |ctx| Box::pin(framework::post_command(ctx)),
                ..Default::default()
            })
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!(
                        user = %ready.user.name,
                        guild_count = ready.guilds.len(),
                        "Connected to Discord"
                    );
                    info!(url = %invite_url(ready.application.id.get()), "Invite the bot with");

                    let commands = &framework.options().commands;
                    match dev_guild {
                        Some(guild) => {
                            poise::builtins::register_in_guild(ctx, commands, guild).await?;
                            info!(guild_id = %guild, count = commands.len(), "Commands registered in guild");
                        }
                        None => {
                            poise::builtins::register_globally(ctx, commands).await?;
                            info!(count = commands.len(), "Commands registered globally");
                        }
                    }

                    let directory = DiscordDirectory::new(ctx.cache.clone(), ctx.http.clone());
                    Ok(Data {
                        checker: AuthorizationChecker::new(
                            Arc::new(directory),
                            services.admin_role_repo,
                        ),
                        unicycles: services.unicycles,
                        admin_roles: services.admin_roles,
                        transfers: services.transfers,
                    })
                })
            })
            .build();

        let intents = serenity::GatewayIntents::non_privileged();
        let mut client = serenity::ClientBuilder::new(config.token, intents)
            .framework(framework)
            .await?;
        let shard_manager = client.shard_manager.clone();

        tokio::select! {
            result = client.start() => result?,
            _ = shutdown => {
                info!("Disconnecting from Discord");
                shard_manager.shutdown_all().await;
            }
        }
        Ok(())
    }
}

/// OAuth URL that adds the bot with the permissions it needs.
pub fn invite_url(application_id: u64) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={application_id}&permissions={INVITE_PERMISSIONS}&scope=bot%20applications.commands"
    )
}
