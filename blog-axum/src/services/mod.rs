mod authors;
mod blogs;
mod comments;

use crate::AxumApp;

/// Mount every service router on the app.
pub fn configure(ax: AxumApp) -> AxumApp {
    let state = ax.state.clone();

    ax.merge(blogs::router(state.clone()))
        .merge(authors::router(state.clone()))
        .merge(comments::router(state))
}
