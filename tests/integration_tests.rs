//! End-to-end scenarios: a producer (or several) driving a real logger
//! front-end through a real sink, not just a unit under test in
//! isolation.

use std::sync::{Arc, Mutex};

use logring::{LogLevel, MultiThreadedLogger, SingleThreadedLogger, Sink, StandardFileSink};

/// A sink that records every rendered line in memory, standing in for
/// the literal console in scenarios where the assertion is about
/// ordering/content rather than the stdout file descriptor itself.
struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl Sink for RecordingSink {
    fn write(&mut self, line: String) {
        self.0.lock().unwrap().push(line);
    }
    fn flush(&mut self) {}
}

fn leak_st() -> &'static SingleThreadedLogger {
    Box::leak(Box::new(SingleThreadedLogger::new()))
}

fn leak_mt() -> &'static MultiThreadedLogger {
    Box::leak(Box::new(MultiThreadedLogger::new()))
}

#[test]
fn scenario_console_default_preserves_emission_order() {
    let logger = leak_st();
    let records = Arc::new(Mutex::new(Vec::new()));
    logger.init(LogLevel::Debug, Box::new(RecordingSink(records.clone())));

    logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "x 1".to_string()));
    logger.log(LogLevel::Debug, file!(), line!(), Box::new(|| "y 2".to_string()));
    logger.log(LogLevel::Error, file!(), line!(), Box::new(|| "z 3".to_string()));
    logger.stop();

    let lines = records.lock().unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(": x 1\n"));
    assert!(lines[1].ends_with(": y 2\n"));
    assert!(lines[2].ends_with(": z 3\n"));
}

#[test]
fn scenario_level_suppression_drops_below_threshold() {
    let logger = leak_st();
    let records = Arc::new(Mutex::new(Vec::new()));
    logger.init(LogLevel::Error, Box::new(RecordingSink(records.clone())));

    logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "ignored".to_string()));
    logger.log(LogLevel::Error, file!(), line!(), Box::new(|| "boom".to_string()));
    logger.stop();

    let lines = records.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(": boom\n"));
}

#[test]
fn scenario_standard_file_append_across_two_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.log");
    let path_str = path.to_str().unwrap().to_string();

    {
        let mut sink = StandardFileSink::open(path_str.clone(), true).unwrap();
        sink.write("first\n".to_string());
    }
    {
        let mut sink = StandardFileSink::open(path_str.clone(), true).unwrap();
        sink.write("second\n".to_string());
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["first", "second"]);
}

#[cfg(all(target_os = "linux", feature = "io_uring"))]
#[test]
fn scenario_async_file_durability_after_stop() {
    use logring::AsyncFileSink;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.log");
    let path_str = path.to_str().unwrap().to_string();

    let logger = leak_st();
    let sink = AsyncFileSink::open(path_str, true).unwrap();
    logger.init(LogLevel::Info, Box::new(sink));

    for i in 0..100 {
        logger.log(LogLevel::Info, file!(), line!(), Box::new(move || format!("record {i}")));
    }
    logger.stop();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 100);
    for (i, line) in contents.lines().enumerate() {
        let expected_suffix = format!(": record {i}");
        assert!(line.ends_with(&expected_suffix));
    }
}

#[test]
fn scenario_mpmc_contention_all_records_received_in_producer_order() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 10_000;

    let logger = leak_mt();
    let records = Arc::new(Mutex::new(Vec::new()));
    logger.init(LogLevel::Trace, Box::new(RecordingSink(records.clone())));

    let mut handles = Vec::new();
    for p in 0..PRODUCERS {
        handles.push(std::thread::spawn(move || {
            for i in 0..PER_PRODUCER {
                logger.log(LogLevel::Info, file!(), line!(), Box::new(move || format!("p{p}-{i}")));
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    logger.stop();

    let lines = records.lock().unwrap();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    let mut per_producer = vec![Vec::new(); PRODUCERS];
    for line in lines.iter() {
        let body = line.split("]: ").last().unwrap().trim_end();
        let mut parts = body.trim_start_matches('p').split('-');
        let p: usize = parts.next().unwrap().parse().unwrap();
        let i: usize = parts.next().unwrap().parse().unwrap();
        per_producer[p].push(i);
    }
    for series in per_producer {
        assert_eq!(series.len(), PER_PRODUCER);
        for (i, v) in series.iter().enumerate() {
            assert_eq!(*v, i, "a producer's own records must stay in issuing order");
        }
    }
}

#[test]
fn scenario_reinit_routes_prior_and_new_records_to_their_own_sinks() {
    let logger = leak_st();
    let console_records = Arc::new(Mutex::new(Vec::new()));
    logger.init(LogLevel::Info, Box::new(RecordingSink(console_records.clone())));

    logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "a".to_string()));
    logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "b".to_string()));
    logger.log(LogLevel::Info, file!(), line!(), Box::new(|| "c".to_string()));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.log");
    let file_sink = StandardFileSink::open(path.to_str().unwrap().to_string(), true).unwrap();
    logger.init(LogLevel::Debug, Box::new(file_sink));

    logger.log(LogLevel::Debug, file!(), line!(), Box::new(|| "d".to_string()));
    logger.log(LogLevel::Debug, file!(), line!(), Box::new(|| "e".to_string()));
    logger.stop();

    assert_eq!(console_records.lock().unwrap().len(), 3);
    let file_contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(file_contents.lines().count(), 2);
}
