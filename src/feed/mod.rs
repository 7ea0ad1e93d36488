pub(crate) mod comments;
pub(crate) mod fixtures;
pub(crate) mod standings;
pub(crate) mod token;

pub use comments::build_comment_tree;
pub use fixtures::{
    project_elimination, project_fixtures, project_fixtures_by_name, project_league,
};
pub use standings::compute_standings;
pub use token::{decode_claims, is_token_expired};
