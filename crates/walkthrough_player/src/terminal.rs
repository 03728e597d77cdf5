//! Raw-mode terminal host: alternate screen, stdin reader thread, and signal forwarding.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use libc::c_int;
use signal_hook::iterator::{Handle, Signals};
use tracing::debug;

const ENTER_SCREEN: &str = "\x1b[?1049h\x1b[?25l\x1b[2J";
const LEAVE_SCREEN: &str = "\x1b[?25h\x1b[?1049l";
const FALLBACK_SIZE: (u16, u16) = (80, 24);
const INPUT_POLL_MS: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Input(String),
    Resize,
    Interrupt,
    Render,
}

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

pub struct RawTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    stop_flag: Arc<AtomicBool>,
    input_thread: Option<JoinHandle<()>>,
    signal_handle: Option<Handle>,
    signal_thread: Option<JoinHandle<()>>,
}

impl RawTerminal {
    /// Enters raw mode and the alternate screen; input and signals are sent to `events`.
    pub fn start(events: Sender<PlayerEvent>) -> io::Result<Self> {
        let stdin_fd = libc::STDIN_FILENO;
        let original = get_termios(stdin_fd)?;
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(stdin_fd, &raw)?;

        let mut terminal = Self {
            stdin_fd,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: Some(original),
            stop_flag: Arc::new(AtomicBool::new(false)),
            input_thread: None,
            signal_handle: None,
            signal_thread: None,
        };
        terminal.write(ENTER_SCREEN)?;
        terminal.start_signal_thread(events.clone())?;
        terminal.start_input_thread(events);
        debug!("terminal entered raw mode");
        Ok(terminal)
    }

    pub fn size(&self) -> (u16, u16) {
        read_winsize(self.stdout_fd).unwrap_or(FALLBACK_SIZE)
    }

    pub fn write(&self, data: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data.as_bytes())?;
        stdout.flush()
    }

    fn start_input_thread(&mut self, events: Sender<PlayerEvent>) {
        let stdin_fd = self.stdin_fd;
        let stop_flag = Arc::clone(&self.stop_flag);

        self.input_thread = Some(thread::spawn(move || {
            let mut buffer = [0u8; 4096];
            while !stop_flag.load(Ordering::SeqCst) {
                if !poll_readable(stdin_fd, INPUT_POLL_MS) {
                    continue;
                }
                let read_len =
                    unsafe { libc::read(stdin_fd, buffer.as_mut_ptr() as *mut _, buffer.len()) };
                if read_len <= 0 {
                    continue;
                }
                let data = String::from_utf8_lossy(&buffer[..read_len as usize]).into_owned();
                if events.send(PlayerEvent::Input(data)).is_err() {
                    break;
                }
            }
        }));
    }

    fn start_signal_thread(&mut self, events: Sender<PlayerEvent>) -> io::Result<()> {
        let mut signals = Signals::new([libc::SIGWINCH, libc::SIGINT, libc::SIGTERM])?;
        self.signal_handle = Some(signals.handle());

        self.signal_thread = Some(thread::spawn(move || {
            for signal in signals.forever() {
                let event = if signal == libc::SIGWINCH {
                    PlayerEvent::Resize
                } else {
                    PlayerEvent::Interrupt
                };
                if events.send(event).is_err() {
                    break;
                }
            }
        }));
        Ok(())
    }

    /// Restores the terminal. Safe to call more than once.
    pub fn stop(&mut self) -> io::Result<()> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.input_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.signal_handle.take() {
            handle.close();
        }
        if let Some(thread) = self.signal_thread.take() {
            let _ = thread.join();
        }
        if let Some(original) = self.original_termios.take() {
            self.write(LEAVE_SCREEN)?;
            set_termios(self.stdin_fd, &original)?;
            debug!("terminal restored");
        }
        Ok(())
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
