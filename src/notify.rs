use serde::Serialize;
use tracing::{info, warn};

/// Payload Zapier receives when a client has been onboarded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardedPayload {
    pub firstname: String,
    pub business_name: String,
    pub discord_id: String,
    pub discord_tag: String,
    pub category_name: String,
    pub joined_at: String,
}

/// Best-effort notification: failures are logged and swallowed, the join
/// workflow never waits on or learns about the outcome.
pub fn notify_onboarded(url: String, payload: OnboardedPayload) {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        match client.post(&url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Notified webhook for {}", payload.firstname);
            }
            Ok(resp) => {
                warn!("Webhook returned {} for {}", resp.status(), payload.firstname);
            }
            Err(e) => {
                warn!("Webhook notification failed for {}: {e}", payload.firstname);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // Zapier keys off the exact camelCase field names; a rename here is a
    // silent integration break.
    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = OnboardedPayload {
            firstname: "Maria".into(),
            business_name: "Nomads".into(),
            discord_id: "42".into(),
            discord_tag: "maria#0".into(),
            category_name: "Maria - Nomads".into(),
            joined_at: "2026-08-30T00:00:00+00:00".into(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "firstname": "Maria",
                "businessName": "Nomads",
                "discordId": "42",
                "discordTag": "maria#0",
                "categoryName": "Maria - Nomads",
                "joinedAt": "2026-08-30T00:00:00+00:00",
            })
        );
    }
}
