use tracing::{debug, instrument};

use crate::api::{self, join_url};
use crate::error::Result;
use crate::feed;
use crate::model::*;

/// The main entry point for reading tournament data from the remote API.
///
/// `TourneyClient` wraps a [`reqwest::Client`] and shapes what it fetches
/// into comment trees, fixture projections and league tables.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> tourney_views::Result<()> {
/// use tourney_views::TourneyClient;
///
/// let client = TourneyClient::new("https://api.example.com");
/// let fixtures = client.get_fixtures("summer-cup").await?;
/// println!("{} matches scheduled", fixtures.match_count());
/// # Ok(())
/// # }
/// ```
pub struct TourneyClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl TourneyClient {
    /// Create a new client with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Send `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The API root every request path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Fetch a post's comments, nested into a reply forest.
    #[instrument(skip(self))]
    pub async fn get_comment_tree(&self, post_id: &str) -> Result<Vec<CommentNode>> {
        let url = self.url(&format!("posts/{post_id}/comments"));
        let comments: Vec<Comment> = api::get_json(&self.http, &url, self.token.as_deref()).await?;
        debug!(count = comments.len(), "fetched comments");
        Ok(feed::build_comment_tree(comments))
    }

    /// Fetch tournament metadata.
    #[instrument(skip(self))]
    pub async fn get_tournament(&self, tournament_id: &str) -> Result<Tournament> {
        let url = self.url(&format!("tournaments/{tournament_id}"));
        api::get_json(&self.http, &url, self.token.as_deref()).await
    }

    /// Fetch the flat match list of a tournament.
    ///
    /// Records that do not decode are logged and left out.
    #[instrument(skip(self))]
    pub async fn get_matches(&self, tournament_id: &str) -> Result<Vec<Match>> {
        let url = self.url(&format!("tournaments/{tournament_id}/matches"));
        let matches: Vec<Match> =
            api::get_json_records(&self.http, &url, self.token.as_deref()).await?;
        debug!(count = matches.len(), "fetched matches");
        Ok(matches)
    }

    /// Fetch a tournament's matches and group them by the tournament's format.
    #[instrument(skip(self))]
    pub async fn get_fixtures(&self, tournament_id: &str) -> Result<Projection> {
        let tournament = self.get_tournament(tournament_id).await?;
        let matches = self.get_matches(tournament_id).await?;
        Ok(feed::project_fixtures_by_name(&matches, &tournament.format))
    }

    /// Fetch a league tournament's matches and tabulate them.
    #[instrument(skip(self))]
    pub async fn get_standings(
        &self,
        tournament_id: &str,
        rule: PointsRule,
    ) -> Result<Vec<StandingRow>> {
        let matches = self.get_matches(tournament_id).await?;
        Ok(feed::compute_standings(&matches, rule))
    }
}
