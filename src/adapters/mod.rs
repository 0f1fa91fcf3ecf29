//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter           | Port            | Backend                         |
//! |-------------------|-----------------|---------------------------------|
//! | `CsvOutdoorSource`| `OutdoorSource` | Hourly CSV file                 |
//! | `LogEventSink`    | `EventSink`     | `log` facade                    |
//! | `console_log`     | (logger)        | stderr, for the command line    |

pub mod console_log;
pub mod csv_source;
pub mod log_sink;
