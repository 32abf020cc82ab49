//! Routing table builder
//!
//! Turns a frozen [`Config`] into the ordered list of [`SinkBinding`]s that
//! make up the active logger, then composes them into a single fan-out
//! [`Dispatch`].
//!
//! This module is organized into:
//! - `format`: Format layer creation macros (one fmt layer per binding)

#[macro_use]
mod format;

// External dependencies
use smallvec::SmallVec;
use tracing::Dispatch;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt};

// Internal crates
use crate::config::{Config, Level, Mode};
use crate::core::LogResult;
use crate::layer::SeverityPredicate;
use crate::writer::Destination;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Record encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// One JSON object per line
    Json,
    /// Human-readable text line
    Text,
}

/// How a binding renders records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderConfig {
    /// JSON or text
    pub encoding: Encoding,
    /// Field layout
    pub mode: Mode,
    /// ANSI-colored level labels
    pub color: bool,
}

/// Encoder, destination and severity predicate of one sink
#[derive(Debug, Clone)]
pub struct SinkBinding {
    encoder: EncoderConfig,
    destination: Destination,
    predicate: SeverityPredicate,
}

impl SinkBinding {
    /// Pair an encoder and predicate with a destination
    pub fn new(
        encoder: EncoderConfig,
        destination: Destination,
        predicate: SeverityPredicate,
    ) -> Self {
        Self {
            encoder,
            destination,
            predicate,
        }
    }

    /// How records are rendered
    pub fn encoder(&self) -> &EncoderConfig {
        &self.encoder
    }

    /// Where records go
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Which levels pass
    pub fn predicate(&self) -> &SeverityPredicate {
        &self.predicate
    }

    fn layer(&self) -> BoxedLayer {
        let encoder = self.encoder;
        match encoder.encoding {
            Encoding::Text => {
                create_text_layer!(encoder, self.destination.clone(), self.predicate)
            }
            Encoding::Json => {
                create_json_layer!(encoder, self.destination.clone(), self.predicate)
            }
        }
    }
}

/// Ordered sink bindings derived from one configuration
#[derive(Debug)]
pub struct RoutingTable {
    bindings: SmallVec<[SinkBinding; 3]>,
    stack_trace: Option<Level>,
}

impl RoutingTable {
    /// Derive the bindings for `config`.
    ///
    /// Order: primary file, error file, console. The primary file takes
    /// only sub-error records when an error file exists. Without a primary
    /// file the console is always bound.
    ///
    /// Color applies to the console encoder only. File encoders are never
    /// colored, including the error file when it is the sole file, so log
    /// files never carry ANSI escapes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LogError::Open`] if a log file cannot be
    /// opened. Nothing else can fail.
    pub fn build(config: &Config) -> LogResult<Self> {
        let console_encoder = EncoderConfig {
            encoding: if config.json() {
                Encoding::Json
            } else {
                Encoding::Text
            },
            mode: config.mode(),
            color: config.colorize(),
        };
        let file_encoder = EncoderConfig {
            color: false,
            ..console_encoder
        };

        let mut bindings = SmallVec::new();
        let mut console = config.stdout();

        if let Some(path) = config.log_path() {
            let destination = Destination::open(path, config.rotate())?;
            let predicate = if config.error_log_path().is_some() {
                SeverityPredicate::low_band()
            } else {
                SeverityPredicate::floor(config.level())
            };
            bindings.push(SinkBinding::new(file_encoder, destination, predicate));
        } else {
            console = true;
        }

        if let Some(path) = config.error_log_path() {
            let destination = Destination::open(path, config.rotate())?;
            bindings.push(SinkBinding::new(
                file_encoder,
                destination,
                SeverityPredicate::high_band(),
            ));
        }

        if console {
            bindings.push(Self::console_binding(config, console_encoder));
        }

        Ok(Self {
            bindings,
            stack_trace: config.stack_trace(),
        })
    }

    /// Console-only table; cannot fail
    pub(crate) fn console_only(config: &Config) -> Self {
        let encoder = EncoderConfig {
            encoding: Encoding::Text,
            mode: config.mode(),
            color: config.colorize(),
        };
        let mut bindings = SmallVec::new();
        bindings.push(Self::console_binding(config, encoder));
        Self {
            bindings,
            stack_trace: config.stack_trace(),
        }
    }

    fn console_binding(config: &Config, encoder: EncoderConfig) -> SinkBinding {
        SinkBinding::new(
            encoder,
            Destination::console(config.console()),
            SeverityPredicate::floor(config.level()),
        )
    }

    /// Bindings in routing order
    pub fn bindings(&self) -> &[SinkBinding] {
        &self.bindings
    }

    /// Stack trace threshold, if enabled
    pub fn stack_trace(&self) -> Option<Level> {
        self.stack_trace
    }

    /// Whether at least one binding accepts `level`
    pub fn accepts(&self, level: Level) -> bool {
        self.bindings.iter().any(|b| b.predicate.accepts(level))
    }

    /// Compose every binding into one fan-out subscriber
    pub(crate) fn dispatch(&self) -> Dispatch {
        let layers: Vec<BoxedLayer> = self.bindings.iter().map(SinkBinding::layer).collect();
        Dispatch::new(Registry::default().with(layers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotateConfig;
    use crate::layer::Band;
    use crate::writer::{CaptureBuffer, ConsoleTarget, DestinationKind};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::Path;

    fn kinds(table: &RoutingTable) -> Vec<DestinationKind> {
        table
            .bindings()
            .iter()
            .map(|b| b.destination().kind().clone())
            .collect()
    }

    #[rstest]
    #[case(Level::Debug)]
    #[case(Level::Info)]
    #[case(Level::Error)]
    fn test_no_paths_gives_console_only(#[case] level: Level) {
        let config = Config::builder().level(level).build();
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(kinds(&table), vec![DestinationKind::Console]);
        assert_eq!(
            table.bindings()[0].predicate(),
            &SeverityPredicate::floor(level)
        );
    }

    #[test]
    fn test_both_paths_split_by_severity() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("a.log");
        let err = dir.path().join("err.log");
        let config = Config::builder().path(&log).error_log_path(&err).build();
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(
            kinds(&table),
            vec![DestinationKind::File(log), DestinationKind::File(err)]
        );
        let general = table.bindings()[0].predicate();
        let errors = table.bindings()[1].predicate();
        assert_eq!(general.band(), Band::Low);
        assert_eq!(errors.band(), Band::High);
        for level in Level::ALL {
            assert_eq!(general.accepts(level), level < Level::Error);
            assert_eq!(errors.accepts(level), level >= Level::Error);
        }
    }

    #[test]
    fn test_path_only_takes_everything_above_level() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .path(dir.path().join("a.log"))
            .level(Level::Warn)
            .build();
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(table.bindings().len(), 1);
        assert_eq!(
            table.bindings()[0].predicate(),
            &SeverityPredicate::floor(Level::Warn)
        );
    }

    #[test]
    fn test_stdout_flag_keeps_console_next_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("a.log");
        let err = dir.path().join("err.log");
        let config = Config::builder()
            .stdout(true)
            .path(&log)
            .error_log_path(&err)
            .level(Level::Info)
            .build();
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(
            kinds(&table),
            vec![
                DestinationKind::File(log),
                DestinationKind::File(err),
                DestinationKind::Console
            ]
        );
        let console = table.bindings()[2].predicate();
        assert!(console.accepts(Level::Error));
        assert!(!console.accepts(Level::Debug));
    }

    #[test]
    fn test_error_path_alone_keeps_console() {
        let dir = tempfile::tempdir().unwrap();
        let err = dir.path().join("err.log");
        let config = Config::builder().error_log_path(&err).build();
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(
            kinds(&table),
            vec![DestinationKind::File(err), DestinationKind::Console]
        );
    }

    #[rstest]
    #[case(true, false, false, true)]
    #[case(true, true, false, false)]
    #[case(true, false, true, false)]
    #[case(true, true, true, false)]
    #[case(false, false, false, false)]
    fn test_console_color_rule(
        #[case] color: bool,
        #[case] json: bool,
        #[case] with_path: bool,
        #[case] expected: bool,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = Config::builder().color_level(color).json(json).stdout(true);
        if with_path {
            builder = builder.path(dir.path().join("a.log"));
        }
        let table = RoutingTable::build(&builder.build()).unwrap();

        let console = table
            .bindings()
            .iter()
            .find(|b| b.destination().kind() == &DestinationKind::Console)
            .unwrap();
        assert_eq!(console.encoder().color, expected && cfg!(feature = "ansi"));
        for binding in table.bindings() {
            if binding.destination().kind() != &DestinationKind::Console {
                assert!(!binding.encoder().color);
            }
        }
    }

    #[test]
    fn test_json_applies_to_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .json(true)
            .stdout(true)
            .mode(Mode::Production)
            .path(dir.path().join("a.log"))
            .build();
        let table = RoutingTable::build(&config).unwrap();

        for binding in table.bindings() {
            assert_eq!(binding.encoder().encoding, Encoding::Json);
            assert_eq!(binding.encoder().mode, Mode::Production);
        }
    }

    #[test]
    fn test_rotate_picks_rotating_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("a.log");
        let err = dir.path().join("err.log");
        let config = Config::builder()
            .rotate(true)
            .path(&log)
            .error_log_path(&err)
            .build();
        assert_eq!(config.rotate(), &RotateConfig::enabled());
        let table = RoutingTable::build(&config).unwrap();

        assert_eq!(
            kinds(&table),
            vec![
                DestinationKind::RotatingFile(log),
                DestinationKind::RotatingFile(err)
            ]
        );
    }

    #[test]
    fn test_unopenable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .path(dir.path().join("missing").join("a.log"))
            .build();
        let err = RoutingTable::build(&config).unwrap_err();
        assert!(err.is_open_error());
    }

    #[test]
    fn test_unopenable_rotating_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "plain file").unwrap();
        let config = Config::builder()
            .rotate(true)
            .path(blocker.join("a.log"))
            .build();

        let err = RoutingTable::build(&config).unwrap_err();
        assert!(err.is_open_error());
    }

    #[test]
    fn test_error_file_alone_is_uncolored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .color_level(true)
            .error_log_path(dir.path().join("err.log"))
            .build();
        let table = RoutingTable::build(&config).unwrap();

        let error_file = &table.bindings()[0];
        assert_eq!(error_file.predicate().band(), Band::High);
        assert!(!error_file.encoder().color);
        assert_eq!(table.bindings()[1].encoder().color, cfg!(feature = "ansi"));
    }

    #[test]
    fn test_unopenable_error_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .path(dir.path().join("a.log"))
            .error_log_path(Path::new("/definitely/not/here/err.log"))
            .build();
        assert!(RoutingTable::build(&config).is_err());
    }

    #[test]
    fn test_stack_trace_threshold_carried() {
        let config = Config::builder().stack_trace(true, Level::Warn).build();
        let table = RoutingTable::build(&config).unwrap();
        assert_eq!(table.stack_trace(), Some(Level::Warn));
    }

    #[test]
    fn test_accepts_any_binding() {
        let capture = CaptureBuffer::new();
        let config = Config::builder()
            .level(Level::Error)
            .console(ConsoleTarget::Capture(capture))
            .build();
        let table = RoutingTable::build(&config).unwrap();

        assert!(table.accepts(Level::Error));
        assert!(!table.accepts(Level::Warn));
    }

    #[test]
    fn test_console_only_bootstrap() {
        let table = RoutingTable::console_only(&Config::bootstrap());

        assert_eq!(kinds(&table), vec![DestinationKind::Console]);
        let binding = &table.bindings()[0];
        assert_eq!(binding.encoder().encoding, Encoding::Text);
        assert_eq!(binding.encoder().mode, Mode::Development);
        assert!(!binding.encoder().color);
        assert!(binding.predicate().accepts(Level::Debug));
        assert_eq!(table.stack_trace(), None);
    }
}
