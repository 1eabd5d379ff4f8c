//! In-memory capability fakes for controller tests.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::channel::oneshot;
use futures::executor::block_on;
use parking_lot::Mutex;

use crate::models::config::SessionConfiguration;
use crate::models::error::SessionError;
use crate::models::media::{Album, Asset, CaptureOptions, ImageRef, PickerOptions};
use crate::models::notice::Notice;
use crate::models::permission::PermissionStatus;
use crate::models::state::SessionSnapshot;
use crate::session::controller::SessionController;
use crate::traits::camera_provider::CameraProvider;
use crate::traits::gallery_picker::GalleryPicker;
use crate::traits::media_library::MediaLibrary;
use crate::traits::session_delegate::SessionDelegate;

pub(crate) type TestSession = SessionController<FakeCamera, FakeGallery, FakeLibrary>;

type Permission = Result<PermissionStatus, SessionError>;

enum Scripted<T> {
    Ready(T),
    Gated(oneshot::Receiver<T>),
}

/// Queue of scripted answers for one collaborator call.
///
/// Answers are consumed in order; once empty, `fallback` is returned.
/// A gated answer resolves only when the test sends on the returned sender.
pub(crate) struct Script<T> {
    queue: Mutex<VecDeque<Scripted<T>>>,
    fallback: T,
    calls: Mutex<usize>,
}

impl<T: Clone + Send + Sync> Script<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(0),
        }
    }

    pub fn push(&self, value: T) {
        self.queue.lock().push_back(Scripted::Ready(value));
    }

    pub fn gate(&self) -> oneshot::Sender<T> {
        let (tx, rx) = oneshot::channel();
        self.queue.lock().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }

    async fn next(&self) -> T {
        *self.calls.lock() += 1;
        let entry = self.queue.lock().pop_front();
        match entry {
            None => self.fallback.clone(),
            Some(Scripted::Ready(value)) => value,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| self.fallback.clone()),
        }
    }
}

pub(crate) struct FakeCamera {
    pub status: Script<Permission>,
    pub prompt: Script<Permission>,
    pub captures: Script<Result<ImageRef, SessionError>>,
    options: Mutex<Vec<CaptureOptions>>,
}

impl FakeCamera {
    pub fn granted() -> Self {
        Self {
            status: Script::new(Ok(PermissionStatus::Granted)),
            prompt: Script::new(Ok(PermissionStatus::Granted)),
            captures: Script::new(Err(SessionError::CaptureFailed("nothing scripted".into()))),
            options: Mutex::new(Vec::new()),
        }
    }

    pub fn capture_options(&self) -> Vec<CaptureOptions> {
        self.options.lock().clone()
    }
}

impl CameraProvider for FakeCamera {
    async fn permission_status(&self) -> Permission {
        self.status.next().await
    }

    async fn request_permission(&self) -> Permission {
        self.prompt.next().await
    }

    async fn capture(&self, options: CaptureOptions) -> Result<ImageRef, SessionError> {
        self.options.lock().push(options);
        self.captures.next().await
    }
}

pub(crate) struct FakeGallery {
    pub permission: Script<Permission>,
    pub picks: Script<Result<Option<ImageRef>, SessionError>>,
    options: Mutex<Vec<PickerOptions>>,
}

impl FakeGallery {
    fn with_permission(status: PermissionStatus) -> Self {
        Self {
            permission: Script::new(Ok(status)),
            picks: Script::new(Ok(None)),
            options: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::with_permission(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::with_permission(PermissionStatus::Denied)
    }

    pub fn pick_options(&self) -> Vec<PickerOptions> {
        self.options.lock().clone()
    }
}

impl GalleryPicker for FakeGallery {
    async fn request_permission(&self) -> Permission {
        self.permission.next().await
    }

    async fn pick(&self, options: PickerOptions) -> Result<Option<ImageRef>, SessionError> {
        self.options.lock().push(options);
        self.picks.next().await
    }
}

/// Media library keeping albums in memory.
pub(crate) struct FakeLibrary {
    pub permission: Script<Permission>,
    failure: Mutex<Option<SessionError>>,
    albums: Mutex<Vec<(Album, Vec<Asset>)>>,
    next_id: Mutex<u64>,
    calls: Mutex<usize>,
}

impl FakeLibrary {
    fn with_permission(status: PermissionStatus) -> Self {
        Self {
            permission: Script::new(Ok(status)),
            failure: Mutex::new(None),
            albums: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
            calls: Mutex::new(0),
        }
    }

    pub fn granted() -> Self {
        Self::with_permission(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::with_permission(PermissionStatus::Denied)
    }

    /// Make the next `create_asset` fail with `error`.
    pub fn fail_next(&self, error: SessionError) {
        *self.failure.lock() = Some(error);
    }

    /// Calls made to anything other than `request_permission`.
    pub fn operation_calls(&self) -> usize {
        *self.calls.lock()
    }

    pub fn album_count(&self) -> usize {
        self.albums.lock().len()
    }

    pub fn album_contents(&self, title: &str) -> Vec<ImageRef> {
        self.albums
            .lock()
            .iter()
            .filter(|(album, _)| album.title == title)
            .flat_map(|(_, assets)| assets.iter().map(|a| a.uri.clone()))
            .collect()
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut id = self.next_id.lock();
        *id += 1;
        format!("{}-{}", prefix, *id)
    }
}

impl MediaLibrary for FakeLibrary {
    async fn request_permission(&self) -> Permission {
        self.permission.next().await
    }

    async fn create_asset(&self, image: &ImageRef) -> Result<Asset, SessionError> {
        *self.calls.lock() += 1;
        let failure = self.failure.lock().take();
        if let Some(error) = failure {
            return Err(error);
        }
        Ok(Asset {
            id: self.next_id("asset"),
            uri: image.clone(),
        })
    }

    async fn find_album(&self, title: &str) -> Result<Option<Album>, SessionError> {
        *self.calls.lock() += 1;
        Ok(self
            .albums
            .lock()
            .iter()
            .find(|(album, _)| album.title == title)
            .map(|(album, _)| album.clone()))
    }

    async fn create_album(&self, title: &str, asset: &Asset) -> Result<Album, SessionError> {
        *self.calls.lock() += 1;
        let album = Album {
            id: self.next_id("album"),
            title: title.to_string(),
        };
        self.albums.lock().push((album.clone(), vec![asset.clone()]));
        Ok(album)
    }

    async fn add_to_album(&self, album: &Album, asset: &Asset) -> Result<(), SessionError> {
        *self.calls.lock() += 1;
        let mut albums = self.albums.lock();
        let (_, assets) = albums
            .iter_mut()
            .find(|(a, _)| a.id == album.id)
            .ok_or_else(|| SessionError::StorageError(format!("no album {}", album.id)))?;
        assets.push(asset.clone());
        Ok(())
    }
}

/// Delegate that records everything it is told.
#[derive(Default)]
pub(crate) struct RecordingDelegate {
    snapshots: Mutex<Vec<SessionSnapshot>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_snapshot(&self) -> Option<SessionSnapshot> {
        self.snapshots.lock().last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl SessionDelegate for RecordingDelegate {
    fn on_state_changed(&self, snapshot: &SessionSnapshot) {
        self.snapshots.lock().push(snapshot.clone());
    }

    fn on_notice(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}

pub(crate) fn controller_with(
    camera: FakeCamera,
    gallery: FakeGallery,
    library: FakeLibrary,
) -> TestSession {
    SessionController::new(camera, gallery, library, SessionConfiguration::default()).unwrap()
}

pub(crate) fn controller() -> TestSession {
    controller_with(FakeCamera::granted(), FakeGallery::granted(), FakeLibrary::granted())
}

pub(crate) fn initialized(session: TestSession) -> TestSession {
    block_on(session.initialize());
    session
}
