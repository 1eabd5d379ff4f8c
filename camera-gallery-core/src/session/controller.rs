use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::models::config::SessionConfiguration;
use crate::models::error::SessionError;
use crate::models::media::{Album, CaptureOptions, Facing, ImageRef};
use crate::models::notice::Notice;
use crate::models::permission::{CameraPermission, Capability, PermissionStatus};
use crate::models::state::{OperationKind, RequestToken, ScreenView, SessionSnapshot};
use crate::session::action::Action;
use crate::traits::camera_provider::CameraProvider;
use crate::traits::gallery_picker::GalleryPicker;
use crate::traits::media_library::MediaLibrary;
use crate::traits::session_delegate::SessionDelegate;

/// Notices kept for `take_notices`; the oldest is dropped on overflow.
const MAX_QUEUED_NOTICES: usize = 16;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
struct SessionState {
    camera_permission: CameraPermission,
    gallery_permission: Option<bool>,
    media_library_permission: Option<bool>,
    facing: Facing,
    captured_image: Option<ImageRef>,
    show_camera: bool,
    next_token: u64,
    latest: HashMap<OperationKind, RequestToken>,
    pending: BTreeSet<OperationKind>,
    notices: VecDeque<Notice>,
}

impl SessionState {
    fn new(facing: Facing) -> Self {
        Self {
            camera_permission: CameraPermission::Unknown,
            gallery_permission: None,
            media_library_permission: None,
            facing,
            captured_image: None,
            show_camera: false,
            next_token: 0,
            latest: HashMap::new(),
            pending: BTreeSet::new(),
            notices: VecDeque::new(),
        }
    }

    fn issue(&mut self, kind: OperationKind) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest.insert(kind, token);
        token
    }

    fn begin(&mut self, kind: OperationKind) -> RequestToken {
        let token = self.issue(kind);
        self.pending.insert(kind);
        token
    }

    /// Supersede an in-flight operation so its result is dropped on arrival.
    fn invalidate(&mut self, kind: OperationKind) {
        if self.pending.remove(&kind) {
            let token = self.issue(kind);
            debug!("invalidated in-flight {:?}, latest token now {}", kind, token.0);
        }
    }

    /// Returns true if `token` is still the latest for `kind`.
    fn settle(&mut self, kind: OperationKind, token: RequestToken) -> bool {
        if self.latest.get(&kind) == Some(&token) {
            self.pending.remove(&kind);
            true
        } else {
            false
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_QUEUED_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    fn view(&self) -> ScreenView {
        ScreenView::select(
            self.camera_permission,
            self.show_camera,
            self.facing,
            self.captured_image.as_ref(),
        )
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            camera_permission: self.camera_permission,
            gallery_permission: self.gallery_permission,
            media_library_permission: self.media_library_permission,
            facing: self.facing,
            captured_image: self.captured_image.clone(),
            show_camera: self.show_camera,
            pending: self.pending.clone(),
            view: self.view(),
        }
    }
}

/// Owns the screen state and mediates between the camera, the gallery
/// picker and the media library.
///
/// Generic over the three platform capabilities so tests can swap in fakes:
/// ```text
/// [CameraProvider] ─┐
/// [GalleryPicker]  ─┼→ SessionController → SessionSnapshot / Notice → [SessionDelegate]
/// [MediaLibrary]   ─┘
/// ```
///
/// Operations take `&self`, so a host can keep several of them in flight.
/// Each async operation gets a [`RequestToken`]; completions that were
/// superseded in the meantime are discarded.
pub struct SessionController<C: CameraProvider, G: GalleryPicker, L: MediaLibrary> {
    camera: C,
    gallery: G,
    library: L,
    config: SessionConfiguration,
    session_state: Mutex<SessionState>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<C: CameraProvider, G: GalleryPicker, L: MediaLibrary> SessionController<C, G, L> {
    pub fn new(
        camera: C,
        gallery: G,
        library: L,
        config: SessionConfiguration,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::ConfigurationFailed)?;

        Ok(Self {
            camera,
            gallery,
            library,
            session_state: Mutex::new(SessionState::new(config.initial_facing)),
            config,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session_state.lock().snapshot()
    }

    pub fn view(&self) -> ScreenView {
        self.session_state.lock().view()
    }

    /// Drain the notices raised since the last call, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.session_state.lock().notices.drain(..).collect()
    }

    /// Route a user action to the matching operation.
    pub async fn dispatch(&self, action: Action) {
        debug!("dispatching {:?}", action);
        match action {
            Action::RequestCameraPermission => self.request_camera_permission().await,
            Action::OpenCamera => {
                if let Err(e) = self.open_camera() {
                    warn!("cannot open camera: {}", e);
                }
            }
            Action::ToggleFacing => {
                self.toggle_facing();
            }
            Action::Capture => self.capture().await,
            Action::CloseCamera => self.close_camera(),
            Action::PickFromGallery => self.pick_from_gallery().await,
            Action::SaveToGallery => self.save_to_gallery().await,
            Action::ClearImage => self.clear_image(),
        }
    }

    /// First-render setup: resolve the camera permission and ask for
    /// gallery and media-library access, all concurrently.
    pub async fn initialize(&self) {
        info!("initializing camera/gallery session");
        futures::join!(
            self.check_camera_permission(),
            self.request_gallery_permission(),
            self.request_media_library_permission(),
        );
    }

    /// Query the camera permission without prompting.
    pub async fn check_camera_permission(&self) {
        let token = self.begin(OperationKind::CameraPermission);
        let result = self.camera.permission_status().await;
        self.apply_camera_permission(token, result);
    }

    /// Prompt for camera access. The only way out of the denied view.
    pub async fn request_camera_permission(&self) {
        let token = self.begin(OperationKind::CameraPermission);
        let result = self.camera.request_permission().await;
        self.apply_camera_permission(token, result);
    }

    pub async fn request_gallery_permission(&self) {
        let token = self.begin(OperationKind::GalleryPermission);
        let result = self.gallery.request_permission().await;
        self.complete(OperationKind::GalleryPermission, token, |s| match result {
            Ok(status) => {
                let granted = status.is_granted();
                s.gallery_permission = Some(granted);
                if granted {
                    info!("gallery access granted");
                    None
                } else {
                    warn!("gallery access {:?}", status);
                    Some(Notice::gallery_permission_denied())
                }
            }
            Err(e) => {
                error!("gallery permission request failed: {}", e);
                s.gallery_permission = Some(false);
                Some(Notice::permission_request_failed(Capability::Gallery))
            }
        });
    }

    pub async fn request_media_library_permission(&self) {
        let token = self.begin(OperationKind::MediaLibraryPermission);
        let result = self.library.request_permission().await;
        self.complete(OperationKind::MediaLibraryPermission, token, |s| match result {
            Ok(status) => {
                let granted = status.is_granted();
                s.media_library_permission = Some(granted);
                if granted {
                    info!("media library access granted");
                    None
                } else {
                    warn!("media library access {:?}", status);
                    Some(Notice::media_library_permission_denied())
                }
            }
            Err(e) => {
                error!("media library permission request failed: {}", e);
                s.media_library_permission = Some(false);
                Some(Notice::permission_request_failed(Capability::MediaLibrary))
            }
        });
    }

    /// Show the live camera. Requires camera permission.
    pub fn open_camera(&self) -> Result<(), SessionError> {
        self.update(|s| {
            if !s.camera_permission.is_granted() {
                return Err(SessionError::PermissionDenied(Capability::Camera));
            }
            s.show_camera = true;
            info!("camera opened ({:?})", s.facing);
            Ok(())
        })
    }

    /// Flip between the front and back camera while the camera is shown.
    ///
    /// Returns the facing in effect afterwards.
    pub fn toggle_facing(&self) -> Facing {
        let mut changed = false;
        let facing = self.update(|s| {
            if s.show_camera {
                s.facing = s.facing.toggled();
                changed = true;
            }
            s.facing
        });
        if !changed {
            debug!("toggle ignored: camera not shown");
        }
        facing
    }

    /// Take a picture. On success the preview shows it and the camera closes;
    /// on failure the camera stays open and the user is told.
    pub async fn capture(&self) {
        let Some(token) = self.try_begin(OperationKind::Capture, |s| s.show_camera) else {
            debug!("capture ignored: camera not shown");
            return;
        };

        let options = CaptureOptions {
            quality: self.config.capture_quality,
        };
        let result = self.camera.capture(options).await;

        self.complete(OperationKind::Capture, token, |s| match result {
            Ok(image) => {
                info!("captured {}", image);
                s.captured_image = Some(image);
                s.show_camera = false;
                None
            }
            Err(e) => {
                error!("capture failed: {}", e);
                Some(Notice::capture_failed())
            }
        });
    }

    /// Leave the camera without capturing. Any capture still in flight is dropped.
    pub fn close_camera(&self) {
        self.update(|s| {
            s.invalidate(OperationKind::Capture);
            s.show_camera = false;
        });
        info!("camera closed");
    }

    /// Replace the preview with an image chosen from the gallery.
    pub async fn pick_from_gallery(&self) {
        let granted = self.session_state.lock().gallery_permission == Some(true);
        if !granted {
            warn!("gallery pick refused: no gallery permission");
            self.notify(Notice::gallery_access_missing());
            return;
        }

        let token = self.begin(OperationKind::Pick);
        let result = self.gallery.pick(self.config.picker).await;

        self.complete(OperationKind::Pick, token, |s| match result {
            Ok(Some(image)) => {
                info!("picked {}", image);
                s.captured_image = Some(image);
                None
            }
            Ok(None) => {
                info!("gallery picker cancelled");
                None
            }
            Err(e) => {
                error!("gallery picker failed: {}", e);
                Some(Notice::picker_failed())
            }
        });
    }

    /// Persist the previewed image into the configured album.
    ///
    /// The preview is kept either way. Results are always reported, even if
    /// the preview changed meanwhile, since the write already happened.
    pub async fn save_to_gallery(&self) {
        let image = self.session_state.lock().captured_image.clone();
        let Some(image) = image else {
            debug!("save ignored: no image");
            return;
        };

        let token = self.begin(OperationKind::Save);
        let notice = match self.persist(&image).await {
            Ok(album) => {
                info!("saved {} to album '{}'", image, album.title);
                Notice::save_succeeded()
            }
            Err(e) => {
                error!("failed to save {}: {}", image, e);
                Notice::save_failed()
            }
        };

        let snapshot = {
            let mut s = self.session_state.lock();
            s.settle(OperationKind::Save, token);
            s.push_notice(notice.clone());
            s.snapshot()
        };
        self.emit(&snapshot, Some(&notice));
    }

    /// Drop the preview. Pending captures and picks are dropped with it.
    pub fn clear_image(&self) {
        self.update(|s| {
            s.invalidate(OperationKind::Capture);
            s.invalidate(OperationKind::Pick);
            s.captured_image = None;
        });
        info!("image cleared");
    }

    // --- Internal helpers ---

    async fn persist(&self, image: &ImageRef) -> Result<Album, SessionError> {
        let asset = self.library.create_asset(image).await?;
        let title = self.config.album_name.as_str();

        match self.library.find_album(title).await? {
            Some(album) => {
                self.library.add_to_album(&album, &asset).await?;
                Ok(album)
            }
            None => {
                debug!("album '{}' missing, creating it", title);
                self.library.create_album(title, &asset).await
            }
        }
    }

    fn apply_camera_permission(
        &self,
        token: RequestToken,
        result: Result<PermissionStatus, SessionError>,
    ) {
        self.complete(OperationKind::CameraPermission, token, |s| match result {
            Ok(status) => {
                s.camera_permission = status.into();
                info!("camera permission {:?}", s.camera_permission);
                None
            }
            Err(e) => {
                error!("camera permission request failed: {}", e);
                s.camera_permission = CameraPermission::Denied;
                Some(Notice::permission_request_failed(Capability::Camera))
            }
        });
    }

    fn begin(&self, kind: OperationKind) -> RequestToken {
        let (token, snapshot) = {
            let mut s = self.session_state.lock();
            let token = s.begin(kind);
            (token, s.snapshot())
        };
        debug!("{:?} started with token {}", kind, token.0);
        self.emit(&snapshot, None);
        token
    }

    fn try_begin(
        &self,
        kind: OperationKind,
        precondition: impl FnOnce(&SessionState) -> bool,
    ) -> Option<RequestToken> {
        let (token, snapshot) = {
            let mut s = self.session_state.lock();
            if !precondition(&*s) {
                return None;
            }
            let token = s.begin(kind);
            (token, s.snapshot())
        };
        debug!("{:?} started with token {}", kind, token.0);
        self.emit(&snapshot, None);
        Some(token)
    }

    /// Apply an async completion if `token` is still current.
    fn complete(
        &self,
        kind: OperationKind,
        token: RequestToken,
        apply: impl FnOnce(&mut SessionState) -> Option<Notice>,
    ) -> bool {
        let (snapshot, notice) = {
            let mut s = self.session_state.lock();
            if !s.settle(kind, token) {
                warn!("discarding stale {:?} result (token {})", kind, token.0);
                return false;
            }
            let notice = apply(&mut *s);
            if let Some(ref n) = notice {
                s.push_notice(n.clone());
            }
            (s.snapshot(), notice)
        };
        self.emit(&snapshot, notice.as_ref());
        true
    }

    fn update<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let (value, snapshot) = {
            let mut s = self.session_state.lock();
            let value = f(&mut *s);
            (value, s.snapshot())
        };
        self.emit(&snapshot, None);
        value
    }

    fn notify(&self, notice: Notice) {
        self.session_state.lock().push_notice(notice.clone());
        if let Some(ref delegate) = self.delegate {
            delegate.on_notice(&notice);
        }
    }

    fn emit(&self, snapshot: &SessionSnapshot, notice: Option<&Notice>) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(snapshot);
            if let Some(notice) = notice {
                delegate.on_notice(notice);
            }
        }
    }
}
