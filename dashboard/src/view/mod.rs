//! The dashboard view
//!
//! `DashboardView` binds the store's user slice to a one-field form and
//! drives two image galleries. It never holds `&mut AppState`: reads arrive as
//! [`ViewMsg`]s produced by tasks in its [`Scope`], writes leave through
//! [`StoreHandle::dispatch`]. The main loop owns the view and feeds every
//! message back through [`DashboardView::apply`].
//!
//! # Lifecycle
//!
//! ```text
//! new()        subscribe to the user slice            (scope key "user")
//! initialize() copy the user's name into the form,
//!              schedule the subscribed-images alias   ("images-subscribed")
//!              fetch the greeting in server mode      ("greeting")
//! teardown()   close the scope; later messages are ignored
//! ```

mod render;

use std::sync::Arc;

use dashboard_components::{
    Description, GalleryAction, GalleryEvent, GalleryModal, ImageDescriptor, ModalViewState,
};
use dashboard_core::{FormBuilder, FormError, FormModel, Scope, StoreError, StoreHandle};
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::api;
use crate::config::{DashboardConfig, ExecutionMode};
use crate::images;
use crate::state::{select_user, AppState, User};

pub use render::DashboardUi;

const USER_KEY: &str = "user";
const IMAGES_KEY: &str = "images$";
const SUBSCRIBED_KEY: &str = "images-subscribed";
const GREETING_KEY: &str = "greeting";

type Images = Vec<Arc<ImageDescriptor>>;

/// Which of the two gallery modals an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryInstance {
    /// Opened synchronously on the owned sequence
    Direct,
    /// Opened once the delayed sequence resolves
    Observable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    NameInput,
    Images,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::NameInput => Focus::Images,
            Focus::Images => Focus::NameInput,
        }
    }
}

/// Everything the view reacts to
#[derive(Debug, Clone)]
pub enum ViewMsg {
    // ===== Subscriptions =====
    UserDidChange(Option<User>),
    GreetingDidLoad(String),
    GreetingDidError(String),
    SubscribedImagesDidLoad,
    ObservableImagesDidLoad {
        images: Images,
        target: Arc<ImageDescriptor>,
    },

    // ===== Gallery widget =====
    Gallery(GalleryInstance, GalleryEvent),

    // ===== User input =====
    NameChange(String),
    ImageSelect(usize),
    ImageOpen,
    ImageOpenObservable,
    ImageAddRandom,
    NameClear,
    StateSubmit,
    Logout,
    FocusNext,
    Quit,
}

impl ViewMsg {
    pub fn direct_gallery(event: GalleryEvent) -> Self {
        ViewMsg::Gallery(GalleryInstance::Direct, event)
    }

    pub fn observable_gallery(event: GalleryEvent) -> Self {
        ViewMsg::Gallery(GalleryInstance::Observable, event)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("user not loaded yet")]
    UserNotLoaded,

    #[error("image {0} is not in the gallery")]
    ImageNotFound(String),

    #[error("gallery has no images")]
    NoImages,

    #[error("view already initialized")]
    AlreadyInitialized,

    #[error("view has been torn down")]
    Destroyed,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// How `initialize` filled the name field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSync {
    /// A user was cached; its name is in the form
    Applied,
    /// No user yet; the name is copied on the first emission that has one
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    Destroyed,
}

pub struct DashboardView {
    config: DashboardConfig,
    store: StoreHandle<AppState, Action>,
    scope: Scope<ViewMsg>,
    lifecycle: Lifecycle,

    user: Option<User>,
    name_sync_pending: bool,
    form: FormModel,
    greeting: Option<String>,
    status: Option<String>,

    images: Images,
    /// Publishes the owned sequence to delayed readers
    images_feed: watch::Sender<Images>,
    /// The subscribed gallery shares `images` once this is set
    subscribed_loaded: bool,
    featured: Images,
    selected: usize,

    modal: ModalViewState,
    modal_observable: ModalViewState,
    description: Description,
    full_description: Description,

    focus: Focus,
    ui: DashboardUi,
}

impl DashboardView {
    /// Build the view and subscribe to the user slice
    ///
    /// Must be called inside a tokio runtime. Messages produced by the view's
    /// tasks are sent to `inbox`.
    pub fn new(
        config: DashboardConfig,
        store: StoreHandle<AppState, Action>,
        forms: &FormBuilder,
        inbox: mpsc::UnboundedSender<ViewMsg>,
    ) -> Self {
        let form = forms.group([(config.name_field.clone(), String::new())]);

        let mut scope = Scope::new("dashboard", inbox);
        scope.stream(
            USER_KEY,
            store.select(select_user).map(ViewMsg::UserDidChange),
        );

        let images = images::gallery(&config.asset_base);
        let (images_feed, _) = watch::channel(images.clone());
        let featured = images::featured(&config.asset_base);

        Self {
            config,
            store,
            scope,
            lifecycle: Lifecycle::Created,
            user: None,
            name_sync_pending: false,
            form,
            greeting: None,
            status: None,
            images,
            images_feed,
            subscribed_loaded: false,
            featured,
            selected: 0,
            modal: ModalViewState::default(),
            modal_observable: ModalViewState::default(),
            description: images::custom_description(),
            full_description: images::custom_full_description(),
            focus: Focus::default(),
            ui: DashboardUi::default(),
        }
    }

    /// Fill the form from the cached user and start the deferred work
    pub fn initialize(&mut self) -> Result<NameSync, ViewError> {
        match self.lifecycle {
            Lifecycle::Destroyed => return Err(ViewError::Destroyed),
            Lifecycle::Initialized => return Err(ViewError::AlreadyInitialized),
            Lifecycle::Created => self.lifecycle = Lifecycle::Initialized,
        }

        let sync = match self.user.as_ref().map(|user| user.name.clone()) {
            Some(name) => {
                self.set_name(name)?;
                NameSync::Applied
            }
            None => {
                self.name_sync_pending = true;
                NameSync::Deferred
            }
        };

        self.scope
            .delay(SUBSCRIBED_KEY, self.config.subscribed_delay, async {
                ViewMsg::SubscribedImagesDidLoad
            });

        if self.config.mode == ExecutionMode::ServerRender {
            let url = self.config.greeting_url.clone();
            self.scope.once(GREETING_KEY, async move {
                let client = reqwest::Client::new();
                match api::fetch_greeting(&client, &url).await {
                    Ok(text) => ViewMsg::GreetingDidLoad(text),
                    Err(e) => ViewMsg::GreetingDidError(e.to_string()),
                }
            });
        }

        info!(?sync, mode = ?self.config.mode, "Dashboard initialized");
        Ok(sync)
    }

    /// Empty the name field and store the user with an empty name
    ///
    /// The field is cleared even when no user is loaded.
    pub fn clear_name(&mut self) -> Result<(), ViewError> {
        self.ensure_alive()?;
        self.set_name("")?;
        self.edit_user(String::new())
    }

    /// Store the user with the name currently in the form
    pub fn submit_state(&mut self) -> Result<(), ViewError> {
        self.ensure_alive()?;
        let name = self.name_value().to_string();
        self.edit_user(name)
    }

    pub fn logout(&mut self) -> Result<(), ViewError> {
        self.ensure_alive()?;
        self.store.dispatch(Action::UserLogout)?;
        Ok(())
    }

    /// Cancel every subscription and pending task and drop the cached user
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.scope.close();
        self.lifecycle = Lifecycle::Destroyed;
        self.user = None;
        self.name_sync_pending = false;
        info!("Dashboard torn down");
    }

    /// Apply one message; returns whether the view needs a re-render
    pub fn apply(&mut self, msg: ViewMsg) -> bool {
        if self.lifecycle == Lifecycle::Destroyed {
            debug!(?msg, "Ignoring message for torn down view");
            return false;
        }

        match msg {
            ViewMsg::UserDidChange(user) => {
                self.on_user(user);
                true
            }
            ViewMsg::GreetingDidLoad(text) => {
                self.greeting = Some(text);
                true
            }
            ViewMsg::GreetingDidError(error) => {
                warn!(%error, "Greeting fetch failed");
                self.status = Some(error);
                true
            }
            ViewMsg::SubscribedImagesDidLoad => {
                debug!(count = self.images.len(), "Subscribed images assigned");
                self.subscribed_loaded = true;
                true
            }
            ViewMsg::ObservableImagesDidLoad { images, target } => {
                self.resolve_observable(&images, &target);
                true
            }
            ViewMsg::Gallery(instance, event) => {
                self.relay(instance, event);
                true
            }
            ViewMsg::NameChange(value) => {
                let result = self.set_name(value).map_err(ViewError::from);
                self.report(result)
            }
            ViewMsg::ImageSelect(index) => {
                self.selected = index.min(self.images.len().saturating_sub(1));
                true
            }
            ViewMsg::ImageOpen => {
                let result = self
                    .selected_image()
                    .and_then(|image| self.open_image_modal(&image).map(|_| ()));
                self.report(result)
            }
            ViewMsg::ImageOpenObservable => {
                let result = self
                    .selected_image()
                    .and_then(|image| self.open_image_modal_observable(&image));
                self.report(result)
            }
            ViewMsg::ImageAddRandom => {
                let result = self.add_random_image().map(|_| ());
                self.report(result)
            }
            ViewMsg::NameClear => {
                let result = self.clear_name();
                self.report(result)
            }
            ViewMsg::StateSubmit => {
                let result = self.submit_state();
                self.report(result)
            }
            ViewMsg::Logout => {
                let result = self.logout();
                self.report(result)
            }
            ViewMsg::FocusNext => {
                self.focus = self.focus.next();
                true
            }
            ViewMsg::Quit => {
                let result = self.store.dispatch(Action::Quit).map_err(ViewError::from);
                self.report(result)
            }
        }
    }

    // ===== Gallery =====

    /// Open the direct gallery on `image`, matched by identity
    pub fn open_image_modal(&mut self, image: &Arc<ImageDescriptor>) -> Result<usize, ViewError> {
        self.ensure_alive()?;
        let index = position(&self.images, image)
            .ok_or_else(|| ViewError::ImageNotFound(image.label().to_string()))?;

        self.modal.open(index);
        for event in GalleryModal::opened(self.images.len(), index) {
            self.relay(GalleryInstance::Direct, event);
        }
        Ok(index)
    }

    /// Open the observable gallery on `image` once the delayed sequence resolves
    ///
    /// A repeated call before resolution replaces the pending one. An image
    /// missing from the resolved sequence is logged and leaves the modal closed.
    pub fn open_image_modal_observable(
        &mut self,
        image: &Arc<ImageDescriptor>,
    ) -> Result<(), ViewError> {
        self.ensure_alive()?;
        let feed = self.images_feed.subscribe();
        let target = Arc::clone(image);
        self.scope
            .delay(IMAGES_KEY, self.config.images_delay, async move {
                let images = feed.borrow().clone();
                ViewMsg::ObservableImagesDidLoad { images, target }
            });
        Ok(())
    }

    // Gallery callbacks are dropped once the view is torn down.

    pub fn on_image_loaded(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        if self.is_destroyed() {
            return;
        }
        info!(gallery = ?instance, action = %event.action, result = %event.result, "Images loaded");
    }

    pub fn on_visible_index(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        if self.is_destroyed() {
            return;
        }
        info!(
            gallery = ?instance,
            action = %event.action,
            result = %event.result,
            "Visible image changed"
        );
        if let Some(index) = event.index() {
            self.modal_mut(instance).current_index = index;
            self.full_description.custom_full_description = Some(format!(
                "Custom description of visible image with index= {}",
                index
            ));
        }
    }

    pub fn on_is_first_image(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        if self.is_destroyed() {
            return;
        }
        info!(
            gallery = ?instance,
            action = %event.action,
            result = %event.result,
            "First image reached"
        );
    }

    pub fn on_is_last_image(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        if self.is_destroyed() {
            return;
        }
        info!(
            gallery = ?instance,
            action = %event.action,
            result = %event.result,
            "Last image reached"
        );
    }

    pub fn on_close_image_modal(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        if self.is_destroyed() {
            return;
        }
        info!(
            gallery = ?instance,
            action = %event.action,
            result = %event.result,
            "Gallery closed"
        );
        self.modal_mut(instance).close();
    }

    /// Append a copy of a randomly chosen image; returns the chosen index
    pub fn add_random_image(&mut self) -> Result<usize, ViewError> {
        self.add_random_image_with(&mut rand::rng())
    }

    pub fn add_random_image_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<usize, ViewError> {
        self.ensure_alive()?;
        if self.images.is_empty() {
            return Err(ViewError::NoImages);
        }

        let index = rng.random_range(0..self.images.len());
        let image = Arc::clone(&self.images[index]);
        self.images.push(image);
        self.images_feed.send_replace(self.images.clone());

        info!(copied = index, count = self.images.len(), "Random image added");
        Ok(index)
    }

    // ===== Accessors =====

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    /// Current value of the name field
    pub fn name_value(&self) -> &str {
        self.form.value(&self.config.name_field).unwrap_or_default()
    }

    pub fn images(&self) -> &[Arc<ImageDescriptor>] {
        &self.images
    }

    /// The subscribed gallery: the owned sequence, once the delayed load fired
    pub fn images_subscribed(&self) -> Option<&[Arc<ImageDescriptor>]> {
        self.subscribed_loaded.then_some(self.images.as_slice())
    }

    pub fn featured(&self) -> &[Arc<ImageDescriptor>] {
        &self.featured
    }

    pub fn modal(&self, instance: GalleryInstance) -> ModalViewState {
        match instance {
            GalleryInstance::Direct => self.modal,
            GalleryInstance::Observable => self.modal_observable,
        }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn full_description(&self) -> &Description {
        &self.full_description
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    /// Last failed operation shown to the user
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Subscriptions and pending tasks still running
    pub fn live_tasks(&self) -> usize {
        self.scope.len()
    }

    pub fn scope(&self) -> &Scope<ViewMsg> {
        &self.scope
    }

    // ===== Internals =====

    fn ensure_alive(&self) -> Result<(), ViewError> {
        if self.is_destroyed() {
            return Err(ViewError::Destroyed);
        }
        Ok(())
    }

    fn set_name(&mut self, name: impl Into<String>) -> Result<(), FormError> {
        self.form.set_value(&self.config.name_field, name)?;
        let value = self.form.value(&self.config.name_field)?;
        self.ui.name_input.move_to_end(value);
        Ok(())
    }

    /// Dispatch the cached user with only the name replaced
    fn edit_user(&self, name: String) -> Result<(), ViewError> {
        let user = self.user.as_ref().ok_or(ViewError::UserNotLoaded)?;
        self.store.dispatch(Action::UserEdit(user.with_name(name)))?;
        Ok(())
    }

    fn on_user(&mut self, user: Option<User>) {
        debug!(signed_in = user.is_some(), "User changed");
        self.user = user;

        if !self.name_sync_pending {
            return;
        }
        if let Some(name) = self.user.as_ref().map(|user| user.name.clone()) {
            self.name_sync_pending = false;
            if let Err(e) = self.set_name(name) {
                warn!(error = %e, "Deferred name sync failed");
            }
        }
    }

    fn resolve_observable(
        &mut self,
        images: &[Arc<ImageDescriptor>],
        target: &Arc<ImageDescriptor>,
    ) {
        let Some(index) = position(images, target) else {
            warn!(image = target.label(), "Image not in resolved gallery");
            return;
        };
        self.modal_observable.open(index);
        for event in GalleryModal::opened(images.len(), index) {
            self.relay(GalleryInstance::Observable, event);
        }
    }

    fn relay(&mut self, instance: GalleryInstance, event: GalleryEvent) {
        match event.action {
            GalleryAction::Loaded => self.on_image_loaded(instance, event),
            GalleryAction::VisibleIndex => self.on_visible_index(instance, event),
            GalleryAction::FirstImage => self.on_is_first_image(instance, event),
            GalleryAction::LastImage => self.on_is_last_image(instance, event),
            GalleryAction::Close => self.on_close_image_modal(instance, event),
        }
    }

    fn modal_mut(&mut self, instance: GalleryInstance) -> &mut ModalViewState {
        match instance {
            GalleryInstance::Direct => &mut self.modal,
            GalleryInstance::Observable => &mut self.modal_observable,
        }
    }

    fn selected_image(&self) -> Result<Arc<ImageDescriptor>, ViewError> {
        self.images
            .get(self.selected)
            .cloned()
            .ok_or(ViewError::NoImages)
    }

    /// Record the outcome of a user operation for the status line
    fn report(&mut self, result: Result<(), ViewError>) -> bool {
        match result {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!(error = %e, "Dashboard operation failed");
                self.status = Some(e.to_string());
            }
        }
        true
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Index of `image` in `images` by reference identity
fn position(images: &[Arc<ImageDescriptor>], image: &Arc<ImageDescriptor>) -> Option<usize> {
    images.iter().position(|candidate| Arc::ptr_eq(candidate, image))
}
