//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use unitrack_auth::{AuthorizationChecker, StaticGuildDirectory};
use unitrack_core::types::{GuildId, RoleId, UserId};
use unitrack_database::DatabasePool;
use unitrack_database::repositories::{
    AdminRoleRepository, GuildSequenceRepository, UnicycleRepository,
};
use unitrack_entity::unicycle::Unicycle;
use unitrack_service::{
    AdminRoleService, PendingTransferStore, RequestContext, TransferWorkflow, UnicycleService,
};

pub const G1: GuildId = GuildId::new(1_000);
pub const G2: GuildId = GuildId::new(2_000);

/// Guild owner of both test guilds.
pub const OWNER: UserId = UserId::new(1);
/// Plain members.
pub const U1: UserId = UserId::new(11);
pub const U2: UserId = UserId::new(12);
pub const U3: UserId = UserId::new(13);
/// Holds the configured admin role.
pub const MOD: UserId = UserId::new(21);
/// Holds the platform administrator permission.
pub const SYSADMIN: UserId = UserId::new(22);

pub const MOD_ROLE: RoleId = RoleId::new(500);

/// Test application context
pub struct TestApp {
    /// Raw pool for schema-level setup
    pub pool: SqlitePool,
    /// In-memory guild membership
    pub directory: Arc<StaticGuildDirectory>,
    /// Capability resolution
    pub checker: AuthorizationChecker,
    /// Direct repository access for assertions
    pub unicycle_repo: Arc<UnicycleRepository>,
    /// Direct repository access for setup
    pub admin_role_repo: Arc<AdminRoleRepository>,
    /// Per-guild number counters
    pub sequences: GuildSequenceRepository,
    /// Pending transfers
    pub pending: Arc<PendingTransferStore>,
    pub unicycles: UnicycleService,
    pub admin_roles: AdminRoleService,
    pub transfers: TransferWorkflow,
}

impl TestApp {
    /// Create a new test application with the default confirmation window
    pub async fn new() -> Self {
        Self::with_transfer_ttl(Duration::from_secs(300)).await
    }

    /// Create a new test application with a custom confirmation window
    pub async fn with_transfer_ttl(ttl: Duration) -> Self {
        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        unitrack_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let unicycle_repo = Arc::new(UnicycleRepository::new(db.pool().clone()));
        let admin_role_repo = Arc::new(AdminRoleRepository::new(db.pool().clone()));
        let sequences = GuildSequenceRepository::new(db.pool().clone());
        let pending = Arc::new(PendingTransferStore::new(ttl));

        let directory = Arc::new(StaticGuildDirectory::new());
        for guild in [G1, G2] {
            directory.add_owner(guild, OWNER);
            directory.add_administrator(guild, SYSADMIN);
            directory.add_member(guild, MOD, vec![MOD_ROLE]);
            for user in [U1, U2, U3] {
                directory.add_member(guild, user, Vec::new());
            }
        }

        let checker = AuthorizationChecker::new(directory.clone(), Arc::clone(&admin_role_repo));

        Self {
            pool: db.pool().clone(),
            directory,
            checker,
            unicycles: UnicycleService::new(Arc::clone(&unicycle_repo), Arc::clone(&pending)),
            admin_roles: AdminRoleService::new(Arc::clone(&admin_role_repo)),
            transfers: TransferWorkflow::new(Arc::clone(&unicycle_repo), Arc::clone(&pending)),
            unicycle_repo,
            admin_role_repo,
            sequences,
            pending,
        }
    }

    /// Request context for `user` acting in `guild`
    pub async fn ctx(&self, guild: GuildId, user: UserId) -> RequestContext {
        RequestContext::establish(&self.checker, Some(guild), user)
            .await
            .expect("Failed to establish request context")
    }

    /// Register `MOD_ROLE` as an admin role of `guild`
    pub async fn grant_mod_role(&self, guild: GuildId) {
        self.admin_role_repo
            .create(guild, MOD_ROLE)
            .await
            .expect("Failed to register admin role");
    }

    /// Add a unicycle as `user`
    pub async fn add(&self, guild: GuildId, user: UserId, name: &str) -> Unicycle {
        let ctx = self.ctx(guild, user).await;
        self.unicycles
            .create(&ctx, name, Some(format!("{name} description")))
            .await
            .expect("Failed to add unicycle")
    }

    /// Make every later write to `unicycles` fail
    pub async fn freeze_unicycles(&self) {
        sqlx::query(
            "CREATE TRIGGER unicycles_frozen BEFORE UPDATE ON unicycles \
             BEGIN SELECT RAISE(ABORT, 'unicycles are frozen'); END",
        )
        .execute(&self.pool)
        .await
        .expect("Failed to install trigger");
    }

    /// Reload a unicycle from the store
    pub async fn reload(&self, guild: GuildId, number: i64) -> Option<Unicycle> {
        self.unicycle_repo
            .find_by_number(guild, number)
            .await
            .expect("Failed to reload unicycle")
    }
}
