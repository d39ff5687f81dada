//! Router that mounts the view for the current route.

use crate::loadable::Loadable;
use crate::route::Route;
use crate::shell::{Outcome, Shell};
use crate::views::{DetailView, FormView, ListView};
use client_admin_api::ClientsApi;
use std::sync::Arc;
use tracing::debug;

/// The mounted view.
pub enum View {
    List(ListView),
    Detail(DetailView),
    Form(FormView),
}

impl View {
    /// Why the view has nothing to show: a failed load, or a record the
    /// backend did not return.
    pub fn load_error(&self) -> Option<&str> {
        match self {
            View::List(view) => view.state().error(),
            View::Detail(view) => match view.state() {
                Loadable::Loaded(None) => Some("Client not found"),
                state => state.error(),
            },
            View::Form(_) => None,
        }
    }
}

/// One console session: a route and the view mounted for it.
pub struct Console {
    api: Arc<dyn ClientsApi>,
    route: Route,
    view: View,
}

impl Console {
    /// Start a session at `route` and run the initial fetch.
    pub async fn open(api: Arc<dyn ClientsApi>, route: Route, shell: &dyn Shell) -> Self {
        let mut console = Self {
            view: View::List(ListView::new(api.clone())),
            api,
            route: Route::List,
        };
        console.mount(route, shell).await;
        console
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Move to `route`, unmounting the current view first. A detail view
    /// moving to another id is retargeted instead of rebuilt.
    pub async fn navigate(&mut self, route: Route, shell: &dyn Shell) {
        let route = route.resolve();
        if let (View::Detail(view), Route::Detail(id)) = (&mut self.view, &route) {
            if view.retarget(id.clone()) {
                self.route = route.clone();
                view.load().await;
            }
            return;
        }

        match &mut self.view {
            View::List(view) => view.unmount(),
            View::Detail(view) => view.unmount(),
            View::Form(view) => view.unmount(),
        }
        self.mount(route, shell).await;
    }

    /// Follow a navigation outcome; other outcomes leave the view in place.
    pub async fn follow(&mut self, outcome: Outcome, shell: &dyn Shell) -> Outcome {
        if let Some(route) = outcome.navigation() {
            self.navigate(route.clone(), shell).await;
        }
        outcome
    }

    async fn mount(&mut self, route: Route, shell: &dyn Shell) {
        let mut route = route.resolve();
        loop {
            debug!(route = %route, "Mounting view");
            self.route = route.clone();
            match route {
                Route::Root | Route::List => {
                    let mut view = ListView::new(self.api.clone());
                    view.load().await;
                    self.view = View::List(view);
                    return;
                }
                Route::Detail(id) => {
                    let mut view = DetailView::new(self.api.clone(), id);
                    view.load().await;
                    self.view = View::Detail(view);
                    return;
                }
                Route::Create => {
                    self.view = View::Form(FormView::create(self.api.clone()));
                    return;
                }
                Route::Edit(id) => {
                    let mut view = FormView::edit(self.api.clone(), id);
                    match view.mount(shell).await {
                        Some(next) => {
                            view.unmount();
                            route = next.resolve();
                        }
                        None => {
                            self.view = View::Form(view);
                            return;
                        }
                    }
                }
            }
        }
    }
}
