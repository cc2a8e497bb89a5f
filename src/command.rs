//! Cross-context command queue.
//!
//! A bounded FIFO of controller commands built on `critical-section` and
//! `heapless::Deque`, so interrupt handlers or a second execution context
//! can drive the controller without touching the channel set directly. The
//! controller drains the queue at the start of every `service` call.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// A request for the controller, applied during `service`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fade one channel toward `level`.
    SetLevel {
        /// Target channel name.
        channel: &'static str,
        /// Desired brightness.
        level: u8,
    },
    /// Fade one channel up to full brightness.
    TurnOn(&'static str),
    /// Fade one channel down to dark.
    TurnOff(&'static str),
    /// Force one channel fully on, skipping the fade.
    SnapOn(&'static str),
    /// Force one channel dark, skipping the fade.
    SnapOff(&'static str),
    /// Advance to the next scene, as if the trigger had fired.
    Advance,
}

/// Error returned when enqueueing into a full queue.
///
/// Carries the rejected command back to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub Command);

/// Error returned when draining an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmpty;

/// Bounded, interrupt-safe command queue.
///
/// Synchronized with critical sections, so it may be shared between the
/// main loop and interrupt context. `N` is the queue capacity.
pub struct CommandQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<Command, N>>>,
}

impl<const N: usize> CommandQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// Senders are `Copy`; any number of contexts may enqueue.
    pub const fn sender(&self) -> CommandSender<'_, N> {
        CommandSender { queue: self }
    }

    /// Get a receiver handle for this queue.
    ///
    /// The controller holds the one receiver that drains it.
    pub const fn receiver(&self) -> CommandReceiver<'_, N> {
        CommandReceiver { queue: self }
    }

    /// Enqueue a command, returning it on overflow.
    pub fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(QueueFull)
        })
    }

    /// Dequeue the oldest command.
    pub fn try_receive(&self) -> Result<Command, QueueEmpty> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(QueueEmpty)
        })
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const N: usize> {
    queue: &'a CommandQueue<N>,
}

impl<const N: usize> CommandSender<'_, N> {
    /// Enqueue a command, returning it on overflow.
    pub fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        self.queue.try_send(command)
    }
}

/// Receiver handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const N: usize> {
    queue: &'a CommandQueue<N>,
}

impl<const N: usize> CommandReceiver<'_, N> {
    /// Dequeue the oldest command.
    pub fn try_receive(&self) -> Result<Command, QueueEmpty> {
        self.queue.try_receive()
    }
}
