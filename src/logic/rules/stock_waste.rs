//! 山札 (Stock) と捨て札 (Waste) に関するルール。

/// 山札から 1 枚めくれるか。
pub fn can_deal_from_stock(stock_is_empty: bool) -> bool {
    !stock_is_empty
}

/// 山札が空の時に、捨て札を山札に戻せるか。
pub fn can_reset_stock_from_waste(stock_is_empty: bool, waste_is_empty: bool) -> bool {
    stock_is_empty && !waste_is_empty
}
