use std::sync::Arc;

use crate::auth::{jwt::JwtKeys, repo::PgUserStore, repo::UserStore};
use crate::config::AppConfig;
use crate::db;
use crate::reviews::repo::{PgReviewStore, ReviewStore};
use crate::wishlist::repo::{PgWishlistStore, WishlistStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtKeys>,
    pub users: Arc<dyn UserStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub wishlist: Arc<dyn WishlistStore>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;

        Ok(Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgReviewStore::new(pool.clone())),
            Arc::new(PgWishlistStore::new(pool)),
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        reviews: Arc<dyn ReviewStore>,
        wishlist: Arc<dyn WishlistStore>,
    ) -> Self {
        let jwt = Arc::new(JwtKeys::new(&config.jwt));
        Self {
            config,
            jwt,
            users,
            reviews,
            wishlist,
        }
    }
}
