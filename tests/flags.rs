mod tests {
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    use tempcycle::{PRIORITY_ORDER, ReadyFlags, TaskId, on_timer};

    #[test]
    fn test_arm_is_idempotent() {
        let flags = ReadyFlags::new();
        flags.arm(TaskId::Alert);
        flags.arm(TaskId::Alert);
        assert_eq!(flags.snapshot(), TaskId::Alert.bit());

        assert_eq!(flags.take_next(), Some(TaskId::Alert));
        assert_eq!(flags.take_next(), None);
    }

    #[test]
    fn test_take_next_follows_priority() {
        let flags = ReadyFlags::new();
        for task in PRIORITY_ORDER.iter().rev() {
            flags.arm(*task);
        }

        for task in PRIORITY_ORDER {
            assert_eq!(flags.take_next(), Some(task));
            assert!(!flags.is_armed(task));
        }
        assert!(!flags.any());
    }

    #[test]
    fn test_timer_callback_only_arms() {
        let flags = ReadyFlags::new();
        on_timer(&flags, TaskId::RenderMatrix);
        assert!(flags.is_armed(TaskId::RenderMatrix));

        on_timer(&flags, TaskId::Acquire);
        assert!(flags.is_armed(TaskId::RenderMatrix));
        assert!(flags.is_armed(TaskId::Acquire));
    }

    #[test]
    fn test_clear_single_flag() {
        let flags = ReadyFlags::new();
        flags.arm(TaskId::Acquire);
        flags.arm(TaskId::AnalyzeTrend);
        flags.clear(TaskId::Acquire);

        assert_eq!(flags.take_next(), Some(TaskId::AnalyzeTrend));
    }

    #[test]
    fn test_rearm_after_take() {
        let flags = ReadyFlags::new();
        flags.arm(TaskId::Acquire);
        assert_eq!(flags.take_next(), Some(TaskId::Acquire));

        flags.arm(TaskId::Acquire);
        assert_eq!(flags.take_next(), Some(TaskId::Acquire));
    }

    #[test]
    fn test_wait_ready_when_armed() {
        let flags = ReadyFlags::new();
        flags.arm(TaskId::Alert);

        let mut cx = Context::from_waker(Waker::noop());
        let mut wait = pin!(flags.wait());
        assert_eq!(wait.as_mut().poll(&mut cx), Poll::Ready(()));
    }

    #[test]
    fn test_wait_wakes_on_arm() {
        let flags = ReadyFlags::new();

        let mut cx = Context::from_waker(Waker::noop());
        let mut wait = pin!(flags.wait());
        assert_eq!(wait.as_mut().poll(&mut cx), Poll::Pending);

        flags.arm(TaskId::Acquire);
        assert_eq!(wait.as_mut().poll(&mut cx), Poll::Ready(()));
    }
}
