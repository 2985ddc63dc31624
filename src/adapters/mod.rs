//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements         | Connects to                 |
//! |--------------|--------------------|-----------------------------|
//! | `hardware`   | RangefinderPort    | HC-SR04 on GPIO             |
//! |              | IndicatorPort      | Status LED on GPIO          |
//! |              | DelayNs            | IDF delay                   |
//! | `log_sink`   | EventSink          | Serial log output           |
//! | `reporter`   | ReportPort         | HTTPS POST (esp_http_client)|
//! | `time`       | ClockPort          | ESP32 system timer          |
//! | `wifi`       | ConnectivityPort   | ESP-IDF WiFi STA            |

pub mod hardware;
pub mod log_sink;
pub mod reporter;
pub mod time;
pub mod wifi;
