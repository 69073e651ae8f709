/// Byte sink the finished frames are handed to.
///
/// Transmission is fire-and-forget: the frame stream carries no error
/// channel, so a sink has nothing to report back.
pub trait OutputSink {
    fn transmit(&mut self, frame: &[u8]);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn transmit(&mut self, frame: &[u8]) {
        (**self).transmit(frame)
    }
}
