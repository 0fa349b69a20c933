// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::{FixedOffset, Local, Utc};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Layout of `YYYY-MM-DD HH:MM:SS`, the wall clock form partner APIs expect.
const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into `2022-03-13 15:20:04` in the host's local time zone.
pub fn format_local_datetime(t: DateTime) -> String {
    t.with_timezone(&Local).format(DATETIME_LAYOUT).to_string()
}

/// Format time into `2022-03-13 15:20:04` at a fixed UTC offset.
pub fn format_datetime_at(t: DateTime, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format(DATETIME_LAYOUT).to_string()
}

/// Add whole seconds to a datetime, saturating on overflow.
pub fn add_seconds(t: DateTime, secs: i64) -> DateTime {
    chrono::TimeDelta::try_seconds(secs)
        .and_then(|delta| t.checked_add_signed(delta))
        .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC)
}
