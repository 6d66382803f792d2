//! Thin operation callers.
//!
//! Each operation supplies its discriminator and fields, routes through
//! the session guard and signed transport, and decodes the verified
//! reply. A reply whose JSON reports `success=false` is a semantic
//! failure surfaced with the server's message; it never changes session
//! state (logout, which does, lives with the lifecycle methods).

use crate::client::EntitlementClient;
use crate::error::{ClientError, ClientResult};
use latchkey_protocol::{
    decode_app_info, decode_file_contents, decode_string_list, decode_user_info, ProtocolError,
    ServerReply,
};
use latchkey_types::{AppInfo, UserInfo};
use serde_json::{Map, Value};

/// Unwraps a reply into its message and payload fields, mapping server
/// verdicts to their typed errors.
fn expect_success(reply: ServerReply) -> ClientResult<(String, Map<String, Value>)> {
    match reply {
        ServerReply::Success {
            message, fields, ..
        } => Ok((message, fields)),
        ServerReply::Failure { message } => Err(ClientError::Rejected { message }),
        ServerReply::AppNotFound => Err(ClientError::AppNotFound),
        ServerReply::VersionMismatch { download } => {
            Err(ClientError::VersionMismatch { download })
        }
    }
}

/// Reads a payload field the operation cannot do without.
fn required_string(fields: &Map<String, Value>, key: &str) -> ClientResult<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| {
            ProtocolError::MalformedEnvelope(format!("missing or non-string `{key}` field")).into()
        })
}

impl EntitlementClient {
    /// Registers a new account bound to this host's fingerprint.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        license_key: &str,
    ) -> ClientResult<UserInfo> {
        let hwid = self.host_fingerprint()?;
        let reply = self
            .dispatch(
                "register",
                &[
                    ("username", username),
                    ("pass", password),
                    ("key", license_key),
                    ("hwid", hwid.as_str()),
                ],
            )
            .await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_user_info(&fields))
    }

    /// Logs in with username and password.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let hwid = self.host_fingerprint()?;
        let reply = self
            .dispatch(
                "login",
                &[
                    ("username", username),
                    ("pass", password),
                    ("hwid", hwid.as_str()),
                ],
            )
            .await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_user_info(&fields))
    }

    /// Logs in with a license key alone.
    pub async fn license_login(&self, license_key: &str) -> ClientResult<UserInfo> {
        let hwid = self.host_fingerprint()?;
        let reply = self
            .dispatch("license", &[("key", license_key), ("hwid", hwid.as_str())])
            .await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_user_info(&fields))
    }

    /// Starts the forgot-password flow; returns the server message.
    pub async fn forgot_password(&self, username: &str, email: &str) -> ClientResult<String> {
        let reply = self
            .dispatch("forgot", &[("username", username), ("email", email)])
            .await?;
        let (message, _) = expect_success(reply)?;
        Ok(message)
    }

    /// Applies a license key to an existing account; returns the server
    /// message. The account must log in again to see the change.
    pub async fn upgrade(&self, username: &str, license_key: &str) -> ClientResult<String> {
        let reply = self
            .dispatch("upgrade", &[("username", username), ("key", license_key)])
            .await?;
        let (message, _) = expect_success(reply)?;
        Ok(message)
    }

    /// Reads an application-scoped variable.
    pub async fn app_variable(&self, var_id: &str) -> ClientResult<String> {
        let reply = self.dispatch("var", &[("varid", var_id)]).await?;
        let (message, _) = expect_success(reply)?;
        Ok(message)
    }

    /// Reads a user-scoped variable.
    pub async fn get_user_variable(&self, name: &str) -> ClientResult<String> {
        let reply = self.dispatch("getvar", &[("var", name)]).await?;
        let (_, fields) = expect_success(reply)?;
        required_string(&fields, "response")
    }

    /// Writes a user-scoped variable.
    pub async fn set_user_variable(&self, name: &str, data: &str) -> ClientResult<()> {
        let reply = self
            .dispatch("setvar", &[("var", name), ("data", data)])
            .await?;
        expect_success(reply)?;
        Ok(())
    }

    /// Bans the current account and hardware id.
    pub async fn ban_self(&self) -> ClientResult<()> {
        let reply = self.dispatch("ban", &[]).await?;
        expect_success(reply)?;
        Ok(())
    }

    /// Downloads a server-hosted file, returning its raw bytes.
    pub async fn download_file(&self, file_id: &str) -> ClientResult<Vec<u8>> {
        let reply = self.dispatch("file", &[("fileid", file_id)]).await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_file_contents(&fields)?)
    }

    /// Relays a request through a server-configured webhook; returns the
    /// response message.
    pub async fn webhook(
        &self,
        web_id: &str,
        params: &str,
        body: &str,
        content_type: &str,
    ) -> ClientResult<String> {
        let reply = self
            .dispatch(
                "webhook",
                &[
                    ("webid", web_id),
                    ("params", params),
                    ("body", body),
                    ("conttype", content_type),
                ],
            )
            .await?;
        let (message, _) = expect_success(reply)?;
        Ok(message)
    }

    /// Checks whether this host's fingerprint is blacklisted.
    pub async fn is_blacklisted(&self) -> ClientResult<bool> {
        let hwid = self.host_fingerprint()?;
        let reply = self.dispatch("checkblacklist", &[("hwid", hwid.as_str())]).await?;
        Ok(matches!(reply, ServerReply::Success { .. }))
    }

    /// Records a message in the server-side event log. Fire-and-forget:
    /// the reply is verified but its contents are ignored.
    pub async fn log_event(&self, message: &str) -> ClientResult<()> {
        let pcuser = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        self.dispatch("log", &[("pcuser", pcuser.as_str()), ("message", message)])
            .await?;
        Ok(())
    }

    /// Fetches the usernames currently online.
    pub async fn fetch_online_users(&self) -> ClientResult<Vec<String>> {
        let reply = self.dispatch("fetchOnline", &[]).await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_string_list(&fields, "users"))
    }

    /// Fetches aggregate application statistics.
    pub async fn fetch_stats(&self) -> ClientResult<AppInfo> {
        let reply = self.dispatch("fetchStats", &[]).await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_app_info(&fields))
    }

    /// Asks the server whether the current session is still valid.
    pub async fn check_session(&self) -> ClientResult<bool> {
        let reply = self.dispatch("check", &[]).await?;
        Ok(matches!(reply, ServerReply::Success { .. }))
    }

    /// Fetches the messages of a chat channel, oldest first.
    pub async fn chat_messages(&self, channel: &str) -> ClientResult<Vec<String>> {
        let reply = self.dispatch("chatget", &[("channel", channel)]).await?;
        let (_, fields) = expect_success(reply)?;
        Ok(decode_string_list(&fields, "messages"))
    }

    /// Sends a chat message; returns whether the server accepted it.
    pub async fn chat_send(&self, channel: &str, message: &str) -> ClientResult<bool> {
        let reply = self
            .dispatch("chatsend", &[("message", message), ("channel", channel)])
            .await?;
        Ok(matches!(reply, ServerReply::Success { .. }))
    }

    /// Renames the current account.
    pub async fn change_username(&self, new_username: &str) -> ClientResult<()> {
        let reply = self
            .dispatch("changeUsername", &[("newUsername", new_username)])
            .await?;
        expect_success(reply)?;
        Ok(())
    }
}
