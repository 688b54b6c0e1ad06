use crate::constants::{LOGIN_PATH, REGISTER_PATH, ROOT_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Home,
    Profile,
    Liked,
    Upload,
    NotFound,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    /// `None` for the catch-all
    pub path: Option<&'static str>,
    pub page: Page,
    pub requires_auth: bool,
    pub shows_player: bool,
}

const fn route(
    path: &'static str,
    page: Page,
    requires_auth: bool,
    shows_player: bool,
) -> RouteDef {
    RouteDef {
        path: Some(path),
        page,
        requires_auth,
        shows_player,
    }
}

pub const NOT_FOUND: RouteDef = RouteDef {
    path: None,
    page: Page::NotFound,
    requires_auth: false,
    shows_player: false,
};

pub const ROUTES: &[RouteDef] = &[
    route(LOGIN_PATH, Page::Login, false, false),
    route(REGISTER_PATH, Page::Register, false, false),
    route(ROOT_PATH, Page::Home, true, true),
    route("/home", Page::Home, true, true),
    route("/profile", Page::Profile, true, true),
    route("/liked", Page::Liked, true, true),
    route("/upload", Page::Upload, true, false),
];

/// Path without query, fragment and trailing slash (`/` stays `/`)
pub fn normalize_path(path: &str) -> String {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Route for a path, falling back to the catch-all
pub fn match_route(path: &str) -> RouteDef {
    let normalized = normalize_path(path);
    ROUTES
        .iter()
        .find(|route| route.path == Some(normalized.as_str()))
        .copied()
        .unwrap_or(NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/liked/"), "/liked");
        assert_eq!(normalize_path("/liked?tab=1#top"), "/liked");
        assert_eq!(normalize_path("profile"), "/profile");
    }

    #[test]
    fn test_route_table_flags() {
        let expectations = [
            ("/login", Page::Login, false, false),
            ("/register", Page::Register, false, false),
            ("/", Page::Home, true, true),
            ("/home", Page::Home, true, true),
            ("/profile", Page::Profile, true, true),
            ("/liked", Page::Liked, true, true),
            ("/upload", Page::Upload, true, false),
        ];
        for (path, page, auth, player) in expectations {
            let route = match_route(path);
            assert_eq!(route.page, page, "{}", path);
            assert_eq!(route.requires_auth, auth, "{}", path);
            assert_eq!(route.shows_player, player, "{}", path);
        }
    }

    #[test]
    fn test_unknown_paths_hit_catch_all() {
        for path in ["/nope", "/liked/extra", "/home/1"] {
            let route = match_route(path);
            assert_eq!(route, NOT_FOUND);
            assert!(!route.requires_auth);
        }
    }
}
