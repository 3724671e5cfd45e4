use super::StreamBuffer;
use crate::core::stream_error::StreamError;

#[test]
fn buffer_rejects_when_full() {
  let mut buffer = StreamBuffer::new(1);
  assert!(buffer.offer(10_u32).is_ok());
  assert!(buffer.is_full());
  assert_eq!(buffer.offer(20_u32), Err(StreamError::BufferOverflow));
  assert_eq!(buffer.len(), 1);
}

#[test]
fn buffer_poll_empty_returns_none() {
  let mut buffer = StreamBuffer::<u32>::new(1);
  assert_eq!(buffer.poll(), None);
}

#[test]
fn buffer_is_fifo() {
  let mut buffer = StreamBuffer::new(3);
  buffer.offer(1_u32).expect("offer");
  buffer.offer(2_u32).expect("offer");
  assert_eq!(buffer.remaining_capacity(), 1);
  assert_eq!(buffer.poll(), Some(1));
  assert_eq!(buffer.poll(), Some(2));
  assert!(buffer.is_empty());
}
