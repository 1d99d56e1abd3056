//! Channel-backed implementation of the change stream interface.
//!
//! The in-process vehicle store pushes change events into the sending half; the watcher service
//! consumes the receiving half through [`ChangeReceiver`].
use crate::result::ReceiverErr;
use crate::use_cases::receiver::{ChangeEvent, ChangeReceiver};

use std::sync::mpsc::Receiver;

pub struct ChannelChangeReceiver {
    rx: Receiver<ChangeEvent>,
}

impl ChannelChangeReceiver {
    pub fn new(rx: Receiver<ChangeEvent>) -> Self {
        Self { rx }
    }
}

impl ChangeReceiver for ChannelChangeReceiver {
    fn recv(&self) -> Result<ChangeEvent, ReceiverErr> {
        Ok(self.rx.recv()?)
    }
}
