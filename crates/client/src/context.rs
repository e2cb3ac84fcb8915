use crate::{
    api::Api,
    error::ServerError,
    pages::{self, Page},
    router::{self, Resolution, Route},
    services::auth,
    session::{SessionStore, Storage},
};
use log::{debug, info};
use models::role::{Role, UserInfo};

/// Everything a command needs: the backend and the signed-in user
pub struct AppContext<S: Storage> {
    pub api: Api,
    pub session: SessionStore<S>,
}

impl<S: Storage> AppContext<S> {
    pub fn new(api: Api, session: SessionStore<S>) -> Self {
        Self { api, session }
    }

    /// Runs the guard for `path` and remembers where the user ended up
    pub fn navigate(&mut self, path: &str) -> Result<Route, ServerError> {
        let from = self.session.location();
        let route = router::navigate(path, from.as_deref(), self.session.user());
        debug!("Navigated {path} -> {route}");

        // public pages are never where a signed-in user is sent back to
        if self.session.is_authenticated() && !route.is_public() {
            self.session.set_location(&route.path())?;
        }

        Ok(route)
    }

    /// Navigates to `path` and loads the page the user lands on
    pub async fn open(&mut self, path: &str) -> Result<Page, ServerError> {
        let route = self.navigate(path)?;
        pages::render(&self.api, self.session.user(), &route).await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserInfo, ServerError> {
        let user = auth::login(&self.api, email, password).await?;
        self.session.update_user(user.id, &user.email, user.role)?;

        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), ServerError> {
        if let Some(user) = self.session.user() {
            info!("{} signed out", user.email);
        }
        self.session.delete_user()
    }

    /// The signed-in user, if the guard lets them reach `path`
    pub fn authorize(&self, path: &str) -> Result<&UserInfo, ServerError> {
        let Some(user) = self.session.user() else {
            return Err(ServerError::NotAuthenticated);
        };

        let wanted = match router::resolve(path) {
            Resolution::Page(route) => route,
            Resolution::Redirect(_) => return Err(ServerError::not_found(path)),
        };

        if router::navigate(path, None, Some(user)) == wanted {
            Ok(user)
        } else {
            Err(ServerError::Forbidden(path.to_string()))
        }
    }

    pub fn require_director(&self) -> Result<&UserInfo, ServerError> {
        let user = self.session.user().ok_or(ServerError::NotAuthenticated)?;
        if user.role != Role::Director {
            return Err(ServerError::Forbidden(format!("{} is not a director", user.email)));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session::MemoryStorage, test_support::spawn_backend};
    use models::Id;

    async fn context() -> AppContext<MemoryStorage> {
        let (api, _db) = spawn_backend().await;
        AppContext::new(api, SessionStore::load(MemoryStorage::default()))
    }

    #[tokio::test]
    async fn test_signed_out_user_lands_on_login() {
        let mut ctx = context().await;

        let page = ctx.open("/conflitos").await.unwrap();
        assert_eq!(page.route, "login");
        assert!(matches!(
            ctx.authorize("/conflitos"),
            Err(ServerError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_login_then_back_to_previous_page() {
        let mut ctx = context().await;
        ctx.login("diana@uni.pt", "admin").await.unwrap();

        assert_eq!(ctx.open("/conflitos").await.unwrap().route, "conflitos");
        assert_eq!(ctx.navigate("/auth").unwrap(), Route::Conflicts);
    }

    #[tokio::test]
    async fn test_not_found_is_not_remembered() {
        let mut ctx = context().await;
        ctx.login("diana@uni.pt", "admin").await.unwrap();

        assert_eq!(ctx.navigate("/conflitos").unwrap(), Route::Conflicts);
        assert_eq!(ctx.navigate("/nada").unwrap(), Route::NotFound);
        assert_eq!(ctx.session.location().as_deref(), Some("/conflitos"));
        assert_eq!(ctx.navigate("/auth").unwrap(), Route::Conflicts);
    }

    #[tokio::test]
    async fn test_student_authorization() {
        let mut ctx = context().await;
        let user = ctx.login("ana@uni.pt", "ana123").await.unwrap();
        assert_eq!(user.id, Id(1));

        assert!(ctx.authorize("/pedidos/novo").is_ok());
        assert!(matches!(
            ctx.authorize("/alocacao-manual"),
            Err(ServerError::Forbidden(_))
        ));
        assert!(ctx.require_director().is_err());

        assert_eq!(ctx.navigate("/auth").unwrap(), Route::StudentProfile { id: Id(1) });
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut ctx = context().await;
        ctx.login("diana@uni.pt", "admin").await.unwrap();
        assert!(ctx.require_director().is_ok());

        ctx.logout().unwrap();
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.navigate("/perfil").unwrap(), Route::Login);
    }
}
