use crate::bracket::Bracket;
use crate::client::{ApiError, ApiResult};
use crate::sportsync::{
    BackendTeam, ErrorBody, LeaderboardResponse, PlayoffTeamsResponse, PredictionsWire,
    SubmitBracketRequest, UpdateDisplayNameRequest, UserBracketsResponse,
};
use crate::{Conference, LeaderboardEntry, PlayoffField, SavedBracket, Team};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "https://prod.eba-gs6tvmnq.us-east-1.elasticbeanstalk.com";

/// Bracket names are capped by the backend schema.
pub const MAX_BRACKET_NAME_LEN: usize = 20;

/// The signed-in identity for authenticated backend calls. Obtained from the
/// external identity provider out of band and passed explicitly per request —
/// there is no ambient current-user state anywhere in the crate.
#[derive(Debug, Clone)]
pub struct Session {
    pub display_name: String,
    pub token: String,
}

impl Session {
    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// One bracket per user per season; the server message is actionable.
    Conflict { message: String },
}

/// Client for the SportSync bracket backend.
#[derive(Debug, Clone)]
pub struct BracketBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for BracketBackend {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BACKEND_URL)
    }
}

impl BracketBackend {
    pub fn new(base_url: Option<String>) -> Self {
        match base_url {
            Some(url) => Self::with_base_url(url),
            None => Self::default(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder()
                .user_agent("gridtui/0.1 (terminal bracket companion)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// The playoff-qualified field for a season: top 7 per conference.
    pub async fn playoff_teams(&self, season: u16) -> ApiResult<PlayoffField> {
        let url = format!("{}/api/teams/playoffs/{season}", self.base_url);
        let raw: PlayoffTeamsResponse = self.get_json(&url).await?;
        if !raw.success {
            return Err(ApiError::Other(
                raw.message
                    .unwrap_or_else(|| "backend reported failure for playoff teams".into()),
            ));
        }
        Ok(PlayoffField {
            afc: map_backend_teams(&raw.afc_teams, Conference::Afc)?,
            nfc: map_backend_teams(&raw.nfc_teams, Conference::Nfc)?,
        })
    }

    /// Submit a finished bracket. A 409 means the user already has a bracket
    /// for this season; local bracket state is never touched by any outcome.
    pub async fn submit_bracket(
        &self,
        session: &Session,
        bracket_name: &str,
        season: u16,
        bracket: &Bracket,
    ) -> ApiResult<SubmitOutcome> {
        let trimmed = bracket_name.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Other("bracket name is required".into()));
        }
        if trimmed.chars().count() > MAX_BRACKET_NAME_LEN {
            return Err(ApiError::Other(format!(
                "bracket name must be at most {MAX_BRACKET_NAME_LEN} characters"
            )));
        }

        let url = format!("{}/api/brackets", self.base_url);
        let payload = SubmitBracketRequest {
            bracket_name: trimmed.to_owned(),
            predictions: PredictionsWire::from(bracket),
            season_year: season,
        };
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, session.bearer())
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if response.status() == StatusCode::CONFLICT {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Ok(SubmitOutcome::Conflict {
                message: body.message.unwrap_or_else(|| {
                    "You can only submit one bracket per season. Delete your existing bracket first."
                        .into()
                }),
            });
        }
        match response.error_for_status() {
            Ok(_) => Ok(SubmitOutcome::Accepted),
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }

    /// The signed-in user's previously submitted brackets.
    pub async fn user_brackets(&self, session: &Session) -> ApiResult<Vec<SavedBracket>> {
        let url = format!("{}/api/user/brackets", self.base_url);
        let raw: UserBracketsResponse = self.get_json_authed(&url, session).await?;
        Ok(raw
            .brackets
            .into_iter()
            .map(|wire| SavedBracket {
                predictions: wire.parse_predictions().map(PredictionsWire::into_bracket),
                id: wire.id,
                bracket_name: wire.bracket_name,
                season_year: wire.season_year,
                created_at: wire.created_at,
                total_score: wire.total_score,
            })
            .collect())
    }

    pub async fn delete_bracket(&self, session: &Session, bracket_id: i64) -> ApiResult<()> {
        let url = format!("{}/api/my-brackets/{bracket_id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, session.bearer())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| ApiError::Api(e, url))
    }

    /// Ordered leaderboard rows for a season. Public, display-only.
    pub async fn leaderboard(&self, season: u16) -> ApiResult<Vec<LeaderboardEntry>> {
        let url = format!("{}/api/leaderboard/{season}", self.base_url);
        let raw: LeaderboardResponse = self.get_json(&url).await?;
        Ok(raw
            .leaderboard
            .into_iter()
            .map(|row| LeaderboardEntry {
                display_name: row.display_name.unwrap_or_else(|| "Anonymous".into()),
                bracket_name: row.bracket_name.unwrap_or_default(),
                total_score: row.total_score.unwrap_or_default(),
                correct_picks: row.correct_picks.unwrap_or_default(),
                total_picks: row.total_picks.unwrap_or_default(),
                created_at: row.created_at,
            })
            .collect())
    }

    pub async fn update_display_name(
        &self,
        session: &Session,
        display_name: &str,
    ) -> ApiResult<()> {
        let url = format!("{}/api/user/display-name", self.base_url);
        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, session.bearer())
            .json(&UpdateDisplayNameRequest { display_name: display_name.to_owned() })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| ApiError::Api(e, url))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    async fn get_json_authed<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        session: &Session,
    ) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.bearer())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: backend wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_backend_teams(rows: &[BackendTeam], conference: Conference) -> ApiResult<Vec<Team>> {
    rows.iter().map(|row| map_backend_team(row, conference)).collect()
}

fn map_backend_team(row: &BackendTeam, conference: Conference) -> ApiResult<Team> {
    let id = id_string(row.id.as_ref()).ok_or_else(|| {
        ApiError::Malformed(format!("playoff team missing id: {:?}", row.name))
    })?;
    let abbrev = row
        .abbreviation
        .clone()
        .ok_or_else(|| ApiError::Malformed(format!("playoff team {id} missing abbreviation")))?;
    let name = row
        .name
        .clone()
        .ok_or_else(|| ApiError::Malformed(format!("playoff team {abbrev} missing name")))?;
    let playoff_seed = row.playoff_seed.ok_or_else(|| {
        ApiError::Malformed(format!("playoff team {abbrev} missing playoffSeed"))
    })?;

    Ok(Team {
        location: row.location.clone().unwrap_or_else(|| name.clone()),
        logo: row.logo.clone(),
        wins: row.wins.unwrap_or_default(),
        losses: row.losses.unwrap_or_default(),
        ties: row.ties.unwrap_or_default(),
        win_percent: row.win_percent.unwrap_or_default(),
        point_differential: differential(row.differential.as_ref()),
        division: None,
        id,
        name,
        abbrev,
        conference,
        playoff_seed,
    })
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The backend serves the differential as a signed display string ("+42").
fn differential(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::String(s)) => s.trim_start_matches('+').parse().unwrap_or_default(),
        Some(Value::Number(n)) => n.as_i64().unwrap_or_default() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::SlotId;

    fn session() -> Session {
        Session { display_name: "Test Fan".into(), token: "test-token".into() }
    }

    fn afc_team(abbrev: &str, seed: u8) -> Team {
        Team {
            id: abbrev.to_ascii_lowercase(),
            name: format!("{abbrev} Football Team"),
            location: abbrev.into(),
            abbrev: abbrev.into(),
            conference: Conference::Afc,
            playoff_seed: seed,
            ..Team::default()
        }
    }

    #[tokio::test]
    async fn playoff_field_parses_and_assigns_conferences() {
        let body = r#"{
          "success": true,
          "afc_teams": [
            { "id": 12, "name": "Kansas City Chiefs", "location": "Kansas City",
              "abbreviation": "KC", "wins": 14, "losses": 3, "ties": 0,
              "winPercent": 0.824, "playoffSeed": 1, "differential": "+154" }
          ],
          "nfc_teams": [
            { "id": "25", "name": "San Francisco 49ers", "location": "San Francisco",
              "abbreviation": "SF", "wins": 12, "losses": 5, "ties": 0,
              "winPercent": 0.706, "playoffSeed": 1, "differential": -3 }
          ]
        }"#;
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/teams/playoffs/2025")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        let field = backend.playoff_teams(2025).await.expect("field parses");
        assert_eq!(field.afc.len(), 1);
        assert_eq!(field.afc[0].id, "12");
        assert_eq!(field.afc[0].conference, Conference::Afc);
        assert_eq!(field.afc[0].point_differential, 154);
        assert_eq!(field.nfc[0].id, "25");
        assert_eq!(field.nfc[0].conference, Conference::Nfc);
        assert_eq!(field.nfc[0].point_differential, -3);
    }

    #[tokio::test]
    async fn submit_sends_bearer_token_and_accepts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/brackets")
            .match_header("authorization", "Bearer test-token")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "success": true }"#)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        let outcome = backend
            .submit_bracket(&session(), "My Bracket", 2025, &Bracket::default())
            .await
            .expect("submit succeeds");
        assert_eq!(outcome, SubmitOutcome::Accepted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_conflict_surfaces_the_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/brackets")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "message": "You already submitted a bracket for 2025." }"#)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        let outcome = backend
            .submit_bracket(&session(), "Second Try", 2025, &Bracket::default())
            .await
            .expect("409 is not a transport error");
        assert_eq!(
            outcome,
            SubmitOutcome::Conflict {
                message: "You already submitted a bracket for 2025.".into()
            }
        );
    }

    #[tokio::test]
    async fn submit_rejects_overlong_names_before_any_request() {
        let backend = BracketBackend::with_base_url("http://127.0.0.1:9");
        let err = backend
            .submit_bracket(&session(), "a name well beyond twenty characters", 2025, &Bracket::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Other(_)));
    }

    #[tokio::test]
    async fn user_brackets_decode_string_encoded_predictions() {
        // Build a real bracket so the stored predictions round-trip.
        let field: Vec<Team> = [
            ("KC", 1), ("BUF", 2), ("BAL", 3), ("HOU", 4), ("CLE", 5), ("PIT", 6), ("MIA", 7),
        ]
        .into_iter()
        .map(|(a, s)| afc_team(a, s))
        .collect();
        let mut bracket = Bracket::default();
        bracket.seed(Conference::Afc, &field);
        let buf = field[1].clone();
        bracket
            .select_winner(SlotId::WildCard(Conference::Afc, 0), &buf)
            .expect("legal pick");
        let encoded =
            serde_json::to_string(&PredictionsWire::from(&bracket)).expect("serializable");
        let body = serde_json::json!({
            "brackets": [ {
                "id": 41,
                "bracket_name": "GoldRush",
                "season_year": 2025,
                "created_at": "2025-12-30T18:00:00Z",
                "total_score": 12,
                "predictions": encoded
            } ]
        })
        .to_string();

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/user/brackets")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        let brackets = backend.user_brackets(&session()).await.expect("brackets parse");
        assert_eq!(brackets.len(), 1);
        assert_eq!(brackets[0].bracket_name, "GoldRush");
        let saved = brackets[0].predictions.as_ref().expect("predictions decode");
        assert_eq!(
            saved.conference(Conference::Afc).wild_card[0]
                .winner
                .as_ref()
                .map(|t| t.abbrev.as_str()),
            Some("BUF")
        );
    }

    #[tokio::test]
    async fn delete_and_display_name_hit_their_routes_with_auth() {
        let mut server = mockito::Server::new_async().await;
        let delete_mock = server
            .mock("DELETE", "/api/my-brackets/41")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(r#"{ "success": true }"#)
            .create_async()
            .await;
        let rename_mock = server
            .mock("PUT", "/api/user/display-name")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(r#"{ "success": true }"#)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        backend.delete_bracket(&session(), 41).await.expect("delete succeeds");
        backend
            .update_display_name(&session(), "Test Fan")
            .await
            .expect("rename succeeds");
        delete_mock.assert_async().await;
        rename_mock.assert_async().await;
    }

    #[tokio::test]
    async fn leaderboard_rows_map_in_order() {
        let body = r#"{
          "leaderboard": [
            { "display_name": "Alice", "bracket_name": "AllChalk", "total_score": 64,
              "correct_picks": 11, "total_picks": 13 },
            { "display_name": "Bob", "bracket_name": "Upsets", "total_score": 40,
              "correct_picks": 8, "total_picks": 13 }
          ]
        }"#;
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/leaderboard/2025")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let backend = BracketBackend::with_base_url(server.url());
        let rows = backend.leaderboard(2025).await.expect("leaderboard parses");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display_name, "Alice");
        assert_eq!(rows[0].total_score, 64);
        assert_eq!(rows[1].correct_picks, 8);
    }
}
