//! Format layer creation macros

/// Options shared by every fmt layer of the fan-out.
///
/// Target and file/line metadata are switched off because records carry
/// `logger` and `caller` fields of their own.
macro_rules! configure_layer {
    ($layer:expr, $encoder:expr, $writer:expr) => {
        $layer
            .with_writer($writer)
            .with_ansi($encoder.color)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .log_internal_errors(false)
    };
}

/// Human-readable layer: full lines in development, compact in production
macro_rules! create_text_layer {
    ($encoder:expr, $writer:expr, $predicate:expr) => {{
        let layer = tracing_subscriber::fmt::layer();
        if $encoder.mode.machine_oriented() {
            configure_layer!(layer.compact(), $encoder, $writer)
                .with_timer($crate::format::EpochTime)
                .with_filter($predicate)
                .boxed()
        } else {
            configure_layer!(layer, $encoder, $writer)
                .with_timer($crate::format::human_timer())
                .with_filter($predicate)
                .boxed()
        }
    }};
}

/// JSON layer: nested fields in development, flattened in production
macro_rules! create_json_layer {
    ($encoder:expr, $writer:expr, $predicate:expr) => {{
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false);
        if $encoder.mode.machine_oriented() {
            configure_layer!(layer.flatten_event(true), $encoder, $writer)
                .with_timer($crate::format::EpochTime)
                .with_filter($predicate)
                .boxed()
        } else {
            configure_layer!(layer.flatten_event(false), $encoder, $writer)
                .with_timer($crate::format::human_timer())
                .with_filter($predicate)
                .boxed()
        }
    }};
}
