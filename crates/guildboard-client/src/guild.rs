//! The dashboard's per-guild JSON views.
//!
//! Every view answers `{"success": true, ...}`; the payload fields differ per view:
//!
//! | view        | path                         | payload                                          |
//! |-------------|------------------------------|--------------------------------------------------|
//! | stats       | `/api/guild/{id}/stats`      | `stats: {active_users, total_messages, mod_actions}` |
//! | top users   | `/api/guild/{id}/top_users`  | `users: [{user_id, message_count}]`              |
//! | mod logs    | `/api/guild/{id}/mod_logs`   | `logs: [{action_type, moderator_id, target_id, reason, timestamp}]` |
//! | activity    | `/api/guild/{id}/activity`   | `labels: [..7 day names], data: [..7 counts]`    |

use serde_json::Value;

use crate::ApiClient;

/// Guild views, resolved relative to the client's base URL.
pub struct GuildApi<'a> {
    client: &'a ApiClient,
}

impl<'a> GuildApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Member, message and moderation totals.
    pub fn stats(&self, guild_id: u64) -> Option<Value> {
        self.client.retrieve(&view_path(guild_id, "stats"))
    }

    /// The ten most active members by message count.
    pub fn top_users(&self, guild_id: u64) -> Option<Value> {
        self.client.retrieve(&view_path(guild_id, "top_users"))
    }

    /// The twenty most recent moderation actions.
    pub fn mod_logs(&self, guild_id: u64) -> Option<Value> {
        self.client.retrieve(&view_path(guild_id, "mod_logs"))
    }

    /// Messages per day over the last seven days.
    pub fn activity(&self, guild_id: u64) -> Option<Value> {
        self.client.retrieve(&view_path(guild_id, "activity"))
    }
}

pub fn view_path(guild_id: u64, view: &str) -> String {
    format!("/api/guild/{guild_id}/{view}")
}
