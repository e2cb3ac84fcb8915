use log::debug;
use models::{
    Id,
    role::{Role, UserInfo},
};
use serde::Serialize;
use std::fmt;

/// Redirect chains longer than this end on the not-found page
pub const MAX_REDIRECTS: usize = 8;

pub const LOGIN_PATH: &str = "/auth";
pub const NOT_FOUND_PATH: &str = "/404";
pub const COURSES_PATH: &str = "/unidades-curriculares";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    DirectorProfile,
    StudentProfile { id: Id },
    CoursesList,
    CourseDetails { id: Id },
    Conflicts,
    Inbox,
    NewRequest,
    RequestDetails { id: Id },
    ManualAllocation { student_id: Option<Id> },
    AutomaticAllocation,
    Login,
    NotFound,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectorProfile => "perfil",
            Self::StudentProfile { .. } => "aluno",
            Self::CoursesList => "unidades-curriculares",
            Self::CourseDetails { .. } => "unidade-curricular",
            Self::Conflicts => "conflitos",
            Self::Inbox => "pedidos",
            Self::NewRequest => "novo-pedido",
            Self::RequestDetails { .. } => "pedido",
            Self::ManualAllocation { .. } => "alocacao-manual",
            Self::AutomaticAllocation => "alocacao-automatica",
            Self::Login => "login",
            Self::NotFound => "not-found",
        }
    }

    /// Canonical path, without trailing slash
    pub fn path(&self) -> String {
        match self {
            Self::DirectorProfile => "/perfil".to_string(),
            Self::StudentProfile { id } => format!("/alunos/{id}"),
            Self::CoursesList => COURSES_PATH.to_string(),
            Self::CourseDetails { id } => format!("{COURSES_PATH}/{id}"),
            Self::Conflicts => "/conflitos".to_string(),
            Self::Inbox => "/pedidos".to_string(),
            Self::NewRequest => "/pedidos/novo".to_string(),
            Self::RequestDetails { id } => format!("/pedidos/{id}"),
            Self::ManualAllocation { student_id: None } => "/alocacao-manual".to_string(),
            Self::ManualAllocation { student_id: Some(id) } => format!("/alocacao-manual/{id}"),
            Self::AutomaticAllocation => "/alocacao-automatica".to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::NotFound => NOT_FOUND_PATH.to_string(),
        }
    }

    /// Reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of matching a path or running the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    Redirect(String),
}

/// Strips the query string, fragment and trailing slashes
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Matches a path against the route table
pub fn resolve(path: &str) -> Resolution {
    let path = normalize(path);
    let segments: Vec<&str> = path.split('/').skip(1).filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        [] => return Resolution::Redirect(COURSES_PATH.to_string()),
        ["perfil"] => Some(Route::DirectorProfile),
        ["alunos", id] => id.parse().ok().map(|id| Route::StudentProfile { id }),
        ["unidades-curriculares"] => Some(Route::CoursesList),
        ["unidades-curriculares", id] => id.parse().ok().map(|id| Route::CourseDetails { id }),
        ["conflitos"] => Some(Route::Conflicts),
        ["pedidos"] => Some(Route::Inbox),
        ["pedidos", "novo"] => Some(Route::NewRequest),
        ["pedidos", id] => id.parse().ok().map(|id| Route::RequestDetails { id }),
        ["alocacao-manual"] => Some(Route::ManualAllocation { student_id: None }),
        ["alocacao-manual", id] => id
            .parse()
            .ok()
            .map(|id| Route::ManualAllocation { student_id: Some(id) }),
        ["alocacao-automatica"] => Some(Route::AutomaticAllocation),
        ["auth"] => Some(Route::Login),
        ["404"] => Some(Route::NotFound),
        _ => None,
    };

    match route {
        Some(route) => Resolution::Page(route),
        None => Resolution::Redirect(NOT_FOUND_PATH.to_string()),
    }
}

/// Where a user lands when there is nowhere else to go
pub fn home(user: &UserInfo) -> String {
    match user.role {
        Role::Director => COURSES_PATH.to_string(),
        Role::Student => Route::StudentProfile { id: user.id }.path(),
        Role::Teacher => NOT_FOUND_PATH.to_string(),
    }
}

/// Access rules applied before every page is shown.
///
/// `from` is the path the user is leaving, if any.
pub fn guard(to: &Route, from: Option<&str>, user: Option<&UserInfo>) -> Resolution {
    if *to == Route::Login {
        if let Some(user) = user {
            let back = from
                .map(normalize)
                .filter(|path| path != LOGIN_PATH)
                .unwrap_or_else(|| home(user));
            return Resolution::Redirect(back);
        }
    }

    if to.is_public() {
        return Resolution::Page(*to);
    }

    let Some(user) = user else {
        return Resolution::Redirect(LOGIN_PATH.to_string());
    };

    match user.role {
        Role::Director => Resolution::Page(*to),
        Role::Student => {
            let path = to.path();
            let allowed = path.starts_with("/alunos/")
                || path.starts_with("/pedidos")
                || path.starts_with(&format!("{COURSES_PATH}/"));

            if allowed {
                Resolution::Page(*to)
            } else {
                Resolution::Redirect(NOT_FOUND_PATH.to_string())
            }
        }
        Role::Teacher => Resolution::Redirect(NOT_FOUND_PATH.to_string()),
    }
}

/// Resolves `path` and runs the guard, following redirects
pub fn navigate(path: &str, from: Option<&str>, user: Option<&UserInfo>) -> Route {
    let mut target = normalize(path);

    for _ in 0..MAX_REDIRECTS {
        let next = match resolve(&target) {
            Resolution::Page(route) => guard(&route, from, user),
            redirect => redirect,
        };

        match next {
            Resolution::Page(route) => return route,
            Resolution::Redirect(to) => {
                debug!("Redirecting {target} -> {to}");
                target = normalize(&to);
            }
        }
    }

    Route::NotFound
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: String,
}

/// Menu entries the user's role may see
pub fn nav_items(user: &UserInfo) -> Vec<NavItem> {
    let items = [
        ("Unidades Curriculares", COURSES_PATH.to_string(), &[Role::Director][..]),
        (
            "Horário",
            Route::StudentProfile { id: user.id }.path(),
            &[Role::Student][..],
        ),
        ("Pedidos", Route::Inbox.path(), &[Role::Director, Role::Student][..]),
        ("Conflitos", Route::Conflicts.path(), &[Role::Director][..]),
    ];

    items
        .into_iter()
        .filter(|(_, _, roles)| roles.contains(&user.role))
        .map(|(label, path, _)| NavItem { label, path })
        .collect()
}
