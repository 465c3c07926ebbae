// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod calculators;
mod entities;
mod index_mapping_config;
mod naming;
mod projection;
mod store;
#[cfg(any(feature = "testing", test))]
pub mod testing;

pub use calculators::*;
pub use entities::*;
pub use index_mapping_config::*;
pub use naming::*;
pub use projection::*;
pub use store::*;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
