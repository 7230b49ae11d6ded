mod tests {
    use tempcycle::{
        Analysis, DiagnosticsReport, DiagnosticsSink, Duration, Instant, ReportChannel,
        SharedSample, TaskId, TimingRecorder, Trend, TryReceiveError,
    };

    fn report(temperature: f32) -> DiagnosticsReport {
        DiagnosticsReport {
            temperature: Some(temperature),
            timings: [None; 4],
            trend: Trend::Rising,
        }
    }

    #[test]
    fn test_report_line_format() {
        let report = DiagnosticsReport {
            temperature: Some(23.5),
            timings: [
                Some(Duration::from_micros(12)),
                Some(Duration::from_micros(183)),
                Some(Duration::from_micros(4)),
                None,
            ],
            trend: Trend::Stable,
        };

        assert_eq!(
            report.to_line().unwrap().as_str(),
            "Temperature: 23.50 °C | T1: 0.0000120s | T2: 0.0001830s | T3: 0.0000040s | T4: -- | Trend: stable"
        );
    }

    #[test]
    fn test_capture_column_order() {
        let mut timings = TimingRecorder::new();
        for (offset, task) in [
            TaskId::Acquire,
            TaskId::RenderDisplay,
            TaskId::AnalyzeTrend,
            TaskId::RenderMatrix,
        ]
        .into_iter()
        .enumerate()
        {
            let start = offset as u64 * 1000;
            timings.start(task, Instant::from_micros(start));
            timings.finish(task, Instant::from_micros(start + offset as u64 + 1));
        }
        let analysis = Analysis {
            sample: SharedSample {
                average_value: 19.25,
            },
            trend: Trend::Falling,
        };

        let report = DiagnosticsReport::capture(Some(analysis), &timings);
        assert_eq!(report.temperature, Some(19.25));
        assert_eq!(report.trend, Trend::Falling);
        assert_eq!(
            report.timings,
            [1, 2, 3, 4].map(|us| Some(Duration::from_micros(us)))
        );
    }

    #[test]
    fn test_channel_fifo() {
        let channel: ReportChannel<4> = ReportChannel::new();
        let mut sender = channel.sender();
        let receiver = channel.receiver();

        sender.emit(&report(1.0));
        sender.emit(&report(2.0));

        assert_eq!(channel.len(), 2);
        assert_eq!(receiver.try_receive().unwrap().temperature, Some(1.0));
        assert_eq!(receiver.try_receive().unwrap().temperature, Some(2.0));
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_channel_drops_oldest_when_full() {
        let channel: ReportChannel<2> = ReportChannel::new();
        assert!(!channel.push(report(1.0)));
        assert!(!channel.push(report(2.0)));
        assert!(channel.push(report(3.0)));

        assert_eq!(channel.dropped(), 1);
        assert_eq!(channel.try_receive().unwrap().temperature, Some(2.0));
        assert_eq!(channel.try_receive().unwrap().temperature, Some(3.0));
    }

    #[test]
    fn test_single_slot_channel_keeps_newest() {
        let channel: ReportChannel<1> = ReportChannel::new();
        assert!(!channel.push(report(1.0)));
        assert_eq!(channel.dropped(), 0);

        assert!(channel.push(report(2.0)));
        assert!(channel.push(report(3.0)));
        assert_eq!(channel.dropped(), 2);
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.try_receive().unwrap().temperature, Some(3.0));
        assert!(channel.is_empty());
    }
}
