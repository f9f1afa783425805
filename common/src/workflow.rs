//! 画面ごとのワークフロー状態機械
//!
//! 登録・認識: `Idle → Submitting → (Success | Failed)`、ユーザー操作で `Idle` に戻る。
//! ギャラリー: `Idle → Loading → (Loaded | Failed)`、ページ変更のたびに再開始。
//!
//! 送信は3段階に分かれる:
//! 1. `begin_submit` で `Submitting` に遷移し、送信内容を取り出す
//! 2. `run` で正規化と通信を行う（コントローラを借用しない）
//! 3. `finish` で結果を反映する（古い世代の結果は捨てる）

use crate::error::Result;
use crate::normalizer::normalize;
use crate::transport::{cancellable, FaceApi, HttpClient};
use crate::types::{EnrollResponse, GalleryPage, RawCapture, RecognitionResult, PAGE_SIZE};
use futures::future::{AbortHandle, AbortRegistration};

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<T> {
    Idle,
    /// ギャラリーでは読み込み中を表す
    Submitting,
    Success(T),
    /// ユーザー向けメッセージ
    Failed(String),
}

impl<T> WorkflowState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, WorkflowState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            WorkflowState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for WorkflowState<T> {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

/// ギャラリーの状態（`Submitting` = Loading, `Success` = Loaded）
pub type GalleryState = WorkflowState<GalleryPage>;

/// 送信1回分の世代番号と中断登録
#[derive(Debug)]
pub struct Ticket {
    generation: u64,
    registration: AbortRegistration,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 状態と実行中リクエストの管理
#[derive(Debug)]
struct Workflow<T> {
    state: WorkflowState<T>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl<T> Workflow<T> {
    fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    fn begin(&mut self) -> Ticket {
        self.abort_in_flight();
        self.generation += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        self.state = WorkflowState::Submitting;
        Ticket {
            generation: self.generation,
            registration,
        }
    }

    /// 結果を反映する。古い世代なら何もせず `false`
    fn finish(&mut self, generation: u64, outcome: Result<T>) -> bool {
        if generation != self.generation || !self.state.is_submitting() {
            tracing::warn!(generation, current = self.generation, "discarding stale result");
            return false;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(value) => WorkflowState::Success(value),
            Err(e) => WorkflowState::Failed(e.to_string()),
        };
        true
    }

    /// ユーザー操作による巻き戻し
    fn reset(&mut self) {
        if self.in_flight.is_some() {
            tracing::warn!(generation = self.generation, "cancelling in-flight request");
        }
        self.abort_in_flight();
        self.generation += 1;
        self.state = WorkflowState::Idle;
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Workflow<T> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

/// 画像の取得元タブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Upload,
    Webcam,
}

#[derive(Debug, Clone, Default)]
struct CaptureSlot {
    mode: CaptureMode,
    capture: Option<RawCapture>,
    /// キャプチャが変わるたびに増える
    revision: u64,
}

impl CaptureSlot {
    fn set(&mut self, capture: Option<RawCapture>) {
        self.capture = capture;
        self.revision += 1;
    }

    fn file(&mut self, bytes: Vec<u8>, filename: String, mime_type: String) {
        self.set(Some(RawCapture::File {
            bytes,
            filename,
            mime_type,
        }));
    }

    fn snapshot(&mut self, data_url: String) {
        self.set(Some(RawCapture::Snapshot { data_url }));
    }

    fn switch_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
        self.set(None);
    }
}

// ============================================
// 顔登録
// ============================================

/// 顔登録フォーム
#[derive(Debug)]
pub struct EnrollmentController {
    slot: CaptureSlot,
    label: String,
    workflow: Workflow<EnrollResponse>,
}

/// `EnrollmentController::begin_submit` で取り出した送信内容
#[derive(Debug)]
pub struct EnrollmentSubmission {
    capture: RawCapture,
    label: String,
    stamp: u64,
    ticket: Ticket,
}

impl EnrollmentController {
    pub fn new() -> Self {
        Self {
            slot: CaptureSlot::default(),
            label: String::new(),
            workflow: Workflow::new(),
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.slot.mode
    }

    pub fn capture(&self) -> Option<&RawCapture> {
        self.slot.capture.as_ref()
    }

    /// 画像を複製せずに変化を検出するための番号
    pub fn capture_revision(&self) -> u64 {
        self.slot.revision
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> &WorkflowState<EnrollResponse> {
        &self.workflow.state
    }

    /// タブ切り替え（キャプチャも破棄）。送信中は無視する
    pub fn set_mode(&mut self, mode: CaptureMode) {
        if self.workflow.state.is_submitting() {
            return;
        }
        self.slot.switch_mode(mode);
        self.workflow.reset();
    }

    pub fn select_file(&mut self, bytes: Vec<u8>, filename: String, mime_type: String) {
        self.slot.file(bytes, filename, mime_type);
        self.workflow.reset();
    }

    pub fn capture_snapshot(&mut self, data_url: String) {
        self.slot.snapshot(data_url);
        self.workflow.reset();
    }

    pub fn retake(&mut self) {
        self.slot.set(None);
        self.workflow.reset();
    }

    /// 送信中は無視する（送信済みの登録を取り消さない）
    pub fn set_label(&mut self, label: impl Into<String>) {
        if self.workflow.state.is_submitting() {
            return;
        }
        self.label = label.into();
        self.workflow.reset();
    }

    /// 送信ボタンを有効にできるか
    pub fn can_submit(&self) -> bool {
        !self.workflow.state.is_submitting()
            && self.slot.capture.is_some()
            && !self.label.trim().is_empty()
    }

    /// `Submitting` に遷移して送信内容を返す。送信できない状態なら `None`
    pub fn begin_submit(&mut self, stamp: u64) -> Option<EnrollmentSubmission> {
        if !self.can_submit() {
            return None;
        }
        let capture = self.slot.capture.clone()?;
        let ticket = self.workflow.begin();
        Some(EnrollmentSubmission {
            capture,
            label: self.label.trim().to_string(),
            stamp,
            ticket,
        })
    }

    /// 結果を反映する。成功時はキャプチャとラベルをクリアする
    pub fn finish(&mut self, generation: u64, outcome: Result<EnrollResponse>) -> bool {
        let succeeded = outcome.is_ok();
        let applied = self.workflow.finish(generation, outcome);
        if applied && succeeded {
            self.slot.set(None);
            self.label.clear();
        }
        applied
    }

    /// begin_submit → run → finish をまとめて行う
    pub async fn submit<C: HttpClient>(
        &mut self,
        api: &FaceApi<C>,
        stamp: u64,
    ) -> &WorkflowState<EnrollResponse> {
        if let Some(submission) = self.begin_submit(stamp) {
            let (generation, outcome) = submission.run(api).await;
            self.finish(generation, outcome);
        }
        self.state()
    }
}

impl Default for EnrollmentController {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentSubmission {
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    /// 正規化して送信する
    pub async fn run<C: HttpClient>(self, api: &FaceApi<C>) -> (u64, Result<EnrollResponse>) {
        let EnrollmentSubmission {
            capture,
            label,
            stamp,
            ticket,
        } = self;
        let request = async move {
            let image = normalize(capture, stamp)?;
            api.submit_enrollment(image, &label).await
        };
        (ticket.generation, cancellable(request, ticket.registration).await)
    }
}

// ============================================
// 顔認識
// ============================================

/// 顔認識フォーム
#[derive(Debug)]
pub struct RecognitionController {
    slot: CaptureSlot,
    workflow: Workflow<RecognitionResult>,
}

#[derive(Debug)]
pub struct RecognitionSubmission {
    capture: RawCapture,
    stamp: u64,
    ticket: Ticket,
}

impl RecognitionController {
    pub fn new() -> Self {
        Self {
            slot: CaptureSlot::default(),
            workflow: Workflow::new(),
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.slot.mode
    }

    pub fn capture(&self) -> Option<&RawCapture> {
        self.slot.capture.as_ref()
    }

    /// 画像を複製せずに変化を検出するための番号
    pub fn capture_revision(&self) -> u64 {
        self.slot.revision
    }

    pub fn state(&self) -> &WorkflowState<RecognitionResult> {
        &self.workflow.state
    }

    /// 送信中は無視する
    pub fn set_mode(&mut self, mode: CaptureMode) {
        if self.workflow.state.is_submitting() {
            return;
        }
        self.slot.switch_mode(mode);
        self.workflow.reset();
    }

    pub fn select_file(&mut self, bytes: Vec<u8>, filename: String, mime_type: String) {
        self.slot.file(bytes, filename, mime_type);
        self.workflow.reset();
    }

    pub fn capture_snapshot(&mut self, data_url: String) {
        self.slot.snapshot(data_url);
        self.workflow.reset();
    }

    pub fn retake(&mut self) {
        self.slot.set(None);
        self.workflow.reset();
    }

    pub fn can_submit(&self) -> bool {
        !self.workflow.state.is_submitting() && self.slot.capture.is_some()
    }

    pub fn begin_submit(&mut self, stamp: u64) -> Option<RecognitionSubmission> {
        if !self.can_submit() {
            return None;
        }
        let capture = self.slot.capture.clone()?;
        let ticket = self.workflow.begin();
        Some(RecognitionSubmission {
            capture,
            stamp,
            ticket,
        })
    }

    pub fn finish(&mut self, generation: u64, outcome: Result<RecognitionResult>) -> bool {
        self.workflow.finish(generation, outcome)
    }

    pub async fn submit<C: HttpClient>(
        &mut self,
        api: &FaceApi<C>,
        stamp: u64,
    ) -> &WorkflowState<RecognitionResult> {
        if let Some(submission) = self.begin_submit(stamp) {
            let (generation, outcome) = submission.run(api).await;
            self.finish(generation, outcome);
        }
        self.state()
    }
}

impl Default for RecognitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionSubmission {
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    pub async fn run<C: HttpClient>(self, api: &FaceApi<C>) -> (u64, Result<RecognitionResult>) {
        let RecognitionSubmission {
            capture,
            stamp,
            ticket,
        } = self;
        let request = async move {
            let image = normalize(capture, stamp)?;
            api.submit_recognition(image).await
        };
        (ticket.generation, cancellable(request, ticket.registration).await)
    }
}

// ============================================
// ギャラリー
// ============================================

/// ギャラリー（ページ番号は1始まり）
#[derive(Debug)]
pub struct GalleryController {
    page: u32,
    page_size: u32,
    /// 読み込み中もページ数を保つため最後の件数を残す
    total_count: u64,
    workflow: Workflow<GalleryPage>,
}

#[derive(Debug)]
pub struct GalleryFetch {
    page: u32,
    page_size: u32,
    ticket: Ticket,
}

impl GalleryController {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
            total_count: 0,
            workflow: Workflow::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn state(&self) -> &GalleryState {
        &self.workflow.state
    }

    pub fn is_loading(&self) -> bool {
        self.workflow.state.is_submitting()
    }

    pub fn total_pages(&self) -> u32 {
        crate::types::total_pages(self.total_count, self.page_size)
    }

    /// 現在のページを（再）読み込みする
    pub fn begin_load(&mut self) -> GalleryFetch {
        let ticket = self.workflow.begin();
        GalleryFetch {
            page: self.page,
            page_size: self.page_size,
            ticket,
        }
    }

    /// ページを変更して読み込みを開始する（前の読み込みは中断）
    pub fn set_page(&mut self, page: u32) -> GalleryFetch {
        self.page = page.max(1);
        self.workflow.reset();
        self.begin_load()
    }

    pub fn finish(&mut self, generation: u64, outcome: Result<GalleryPage>) -> bool {
        let total_count = outcome.as_ref().ok().map(|page| page.total_count);
        let applied = self.workflow.finish(generation, outcome);
        if applied {
            if let Some(total_count) = total_count {
                self.total_count = total_count;
            }
        }
        applied
    }

    pub async fn load<C: HttpClient>(&mut self, api: &FaceApi<C>) -> &GalleryState {
        let fetch = self.begin_load();
        let (generation, outcome) = fetch.run(api).await;
        self.finish(generation, outcome);
        self.state()
    }

    pub async fn go_to<C: HttpClient>(&mut self, page: u32, api: &FaceApi<C>) -> &GalleryState {
        let fetch = self.set_page(page);
        let (generation, outcome) = fetch.run(api).await;
        self.finish(generation, outcome);
        self.state()
    }
}

impl Default for GalleryController {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryFetch {
    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub async fn run<C: HttpClient>(self, api: &FaceApi<C>) -> (u64, Result<GalleryPage>) {
        let GalleryFetch {
            page,
            page_size,
            ticket,
        } = self;
        let request = api.fetch_gallery(page, page_size);
        (ticket.generation, cancellable(request, ticket.registration).await)
    }
}
