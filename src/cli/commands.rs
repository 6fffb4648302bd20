//! # Commands Module / 命令模块
//!
//! - `run` - builds the suite for a device and executes it
//! - `list` - prints the suite a run would execute
//!
//! - `run` - 为设备构建测试套件并执行
//! - `list` - 打印一次运行将会执行的测试套件

pub mod list;
pub mod run;
