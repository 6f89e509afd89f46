//! 可捕获失败的惰性序列。
//!
//! 序列中的每个元素独立地求值为成功（携带转换后的值）或失败（携带首次触发的错误），两者都保留数据源读取到的
//! 原始值。单个元素失败不会中断整个序列，下游可以选择丢弃、替换或观察失败元素，而无需重新执行流水线。
//!
//! 流水线由阶段组成：数据源 -> 零个或多个转换/过滤/观察阶段 -> 终结操作。每个阶段只在下游请求下一个元素时
//! 才从上游拉取一个元素，且每个元素只求值一次。
//!
//! ```
//! use catchseq::{CatchSeq, CatchingExt, Entry};
//!
//! let parsed = vec!["1", "a", "2"].catching().map(|s| s.parse::<i32>());
//!
//! assert_eq!(parsed.drop_failures().collect::<Vec<_>>(), vec![1, 2]);
//! assert_eq!(parsed.default_failures(|| 0).collect::<Vec<_>>(), vec![1, 0, 2]);
//!
//! let failed = parsed.filter_failures().map(|(original, _)| original).collect::<Vec<_>>();
//! assert_eq!(failed, vec!["a"]);
//!
//! let entries = parsed.iter().collect::<Vec<_>>();
//! assert_eq!(entries[0], Entry::success(1, "1"));
//! assert!(entries[1].is_failure());
//! ```

mod config;
mod entry;
mod err;
mod op;
mod output;
mod seq;
mod source;

pub use config::OnFailure;
pub use entry::Entry;
pub use err::CatchErr;
pub use op::{Fallible, FilterIter, Filtered, InspectIter, MapIter, Mapped, OnEachFailure, Pure};
pub use output::{DefaultFailures, Resolve};
pub use seq::{CatchSeq, EntryOf, EntryPredicate};
pub use source::{CatchingExt, Source, SourceIter};
