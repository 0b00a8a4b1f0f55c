//! 规则常量定义

/// 默认棋盘宽度（列数）
pub const DEFAULT_BOARD_WIDTH: u8 = 12;

/// 默认棋盘高度（行数）
pub const DEFAULT_BOARD_HEIGHT: u8 = 12;

/// 棋盘最小边长（双方至少各有一行棋子，中间留两行空行）
pub const MIN_BOARD_SIZE: u8 = 4;

/// 棋盘最大边长（坐标用 u8，方向偏移用 i8 计算）
pub const MAX_BOARD_SIZE: u8 = 64;

/// 吃掉一个兵的得分
pub const MAN_POINTS: u32 = 1;

/// 吃掉一个王的得分
pub const KING_POINTS: u32 = 3;

/// 四个斜向方向，枚举顺序决定走法生成顺序
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
