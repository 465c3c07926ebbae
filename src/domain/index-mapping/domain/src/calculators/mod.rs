// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod basic_index_calculator;
mod custom_index_calculator;
mod filterable_index_calculator;
mod index_calculator;

pub use basic_index_calculator::*;
pub use custom_index_calculator::*;
pub use filterable_index_calculator::*;
pub use index_calculator::*;
