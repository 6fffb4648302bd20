//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs a built suite sequentially, one test at a time, and
//! records the outcome of every test into a `TestResult`. Nothing a test does
//! is propagated past this module: panics become failures, errors become
//! errored outcomes.
//!
//! 此模块按顺序逐个运行已构建的测试套件，并将每个测试的结果记录到 `TestResult` 中。
//! 测试所做的任何事情都不会传播到此模块之外：panic 变为失败，错误变为出错结果。

use anyhow::Error;
use log::{debug, trace};
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::core::case::SkipTest;
use crate::core::models::{Outcome, TestRecord, TestResult};
use crate::core::suite::{Test, TestSuite};

/// Observes a suite run as it progresses. Reporters implement this to print
/// per-test lines while the run is still going.
///
/// 观察测试套件运行的进度。报告器实现此 trait 以在运行过程中打印每个测试的输出行。
pub trait ProgressListener {
    fn start_test(&mut self, _test: &dyn Test) {}

    fn stop_test(&mut self, record: &TestRecord);
}

/// A listener that ignores everything.
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn stop_test(&mut self, _record: &TestRecord) {}
}

/// What happened in one phase (`set_up`, body, `tear_down`) of a test.
enum Phase {
    Ok,
    Err(Error),
    Panic(String),
}

/// Runs every test of the suite in order and collects the outcomes.
///
/// Panics raised on the calling thread are kept out of the panic hook for the
/// duration of the run; their messages are captured into the records instead.
/// Suites may run on several threads at once.
///
/// 按顺序运行测试套件中的每个测试并收集结果。
/// 在运行期间，调用线程上的 panic 不会到达 panic 钩子，其消息会被捕获到记录中。
/// 多个线程可以同时运行测试套件。
pub fn execute_suite(suite: &mut TestSuite, listener: &mut dyn ProgressListener) -> TestResult {
    let _hook = QuietPanicHook::install();
    let mut result = TestResult::new();
    let start_time = Instant::now();

    for case_suite in suite.cases_mut() {
        debug!("running {} ({} tests)", case_suite.name(), case_suite.len());
        for test in case_suite.tests_mut() {
            listener.start_test(&**test);
            let record = run_test(&mut **test);
            listener.stop_test(&record);
            result.add(record);
        }
    }

    result.set_duration(start_time.elapsed());
    result
}

/// Runs a single test through `set_up`, its body and `tear_down`.
///
/// - A `set_up` problem skips the body and `tear_down`.
/// - A panic in the body is a failure; an `Err` is an error, unless it wraps
///   [`SkipTest`], which makes the test skipped.
/// - A `tear_down` problem turns a pass into an error.
pub fn run_test(test: &mut dyn Test) -> TestRecord {
    let start_time = Instant::now();
    trace!("starting {}", test.id());

    let (outcome, message) = match guarded(|| test.set_up()) {
        Phase::Ok => {
            let body = classify(guarded(|| test.call()), Outcome::Failed);
            match guarded(|| test.tear_down()) {
                Phase::Ok => body,
                phase => {
                    let (_, teardown_message) = classify(phase, Outcome::Errored);
                    merge_tear_down(body, teardown_message)
                }
            }
        }
        phase => classify(phase, Outcome::Errored),
    };

    TestRecord {
        case_name: test.case_name().to_string(),
        method_name: test.method_name().to_string(),
        outcome,
        message,
        duration: start_time.elapsed(),
    }
}

fn guarded(f: impl FnOnce() -> anyhow::Result<()>) -> Phase {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Phase::Ok,
        Ok(Err(e)) => Phase::Err(e),
        Err(payload) => Phase::Panic(panic_message(payload.as_ref())),
    }
}

fn classify(phase: Phase, on_panic: Outcome) -> (Outcome, String) {
    match phase {
        Phase::Ok => (Outcome::Passed, String::new()),
        Phase::Err(e) => match e.downcast_ref::<SkipTest>() {
            Some(skip) => (Outcome::Skipped, skip.reason.clone()),
            None => (Outcome::Errored, format!("{e:#}")),
        },
        Phase::Panic(message) => (on_panic, message),
    }
}

fn merge_tear_down(body: (Outcome, String), teardown_message: String) -> (Outcome, String) {
    match body {
        (outcome @ (Outcome::Failed | Outcome::Errored), message) => (
            outcome,
            format!("{message}\n\ntear_down: {teardown_message}"),
        ),
        _ => (Outcome::Errored, format!("tear_down: {teardown_message}")),
    }
}

/// Extracts the message of a panic payload (`&str` or `String`).
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "test panicked with a non-string payload".to_string()
    }
}

type PanicHook = Box<dyn Fn(&panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

thread_local! {
    /// Number of suites currently running on this thread.
    static RUNNING_SUITES: Cell<usize> = const { Cell::new(0) };
}

/// The hook that was installed before the first concurrent run started, and
/// how many runs are still using the quiet hook.
struct HookState {
    users: usize,
    previous: Option<Arc<PanicHook>>,
}

static HOOK_STATE: Mutex<HookState> = Mutex::new(HookState {
    users: 0,
    previous: None,
});

fn hook_state() -> MutexGuard<'static, HookState> {
    HOOK_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Silences panics raised on threads that are running a suite while the guard
/// lives. Panics on other threads still reach the previous hook.
///
/// The quiet hook is installed by the first concurrent run and the previous hook
/// is put back when the last one finishes.
///
/// 在守卫存活期间，静默正在运行测试套件的线程上产生的 panic。其他线程上的 panic 仍会交给之前的钩子。
struct QuietPanicHook;

impl QuietPanicHook {
    fn install() -> Self {
        RUNNING_SUITES.with(|running| running.set(running.get() + 1));

        let mut state = hook_state();
        if state.users == 0 {
            let previous = Arc::new(panic::take_hook());
            let forward = Arc::clone(&previous);
            panic::set_hook(Box::new(move |info| {
                let running = RUNNING_SUITES.try_with(Cell::get).unwrap_or(0);
                if running == 0 {
                    (**forward)(info);
                }
            }));
            state.previous = Some(previous);
        }
        state.users += 1;
        Self
    }
}

impl Drop for QuietPanicHook {
    fn drop(&mut self) {
        RUNNING_SUITES.with(|running| running.set(running.get().saturating_sub(1)));

        let mut state = hook_state();
        state.users = state.users.saturating_sub(1);
        if state.users > 0 {
            return;
        }
        let Some(previous) = state.previous.take() else {
            return;
        };
        // The hook cannot be swapped from a panicking thread. The quiet hook
        // stays and forwards everything, since no suite is running any more.
        if std::thread::panicking() {
            return;
        }
        drop(panic::take_hook());
        match Arc::try_unwrap(previous) {
            Ok(hook) => panic::set_hook(hook),
            Err(shared) => panic::set_hook(Box::new(move |info| (**shared)(info))),
        }
    }
}
