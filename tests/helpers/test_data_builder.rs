// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use inventory_dss::domain::product::ProductRecord;

// ==========================================
// ProductRecord 构建器
// ==========================================

pub struct ProductBuilder {
    sku: String,
    product_name: String,
    category: String,
    tip: u8,
    price: f64,
    margin_pct: f64,
    stock_akyazi: f64,
    stock_ana_depo: f64,
    stock_oms_total: f64,
    daily_sales_avg_30d: f64,
    daily_sales_avg_7d: f64,
    daily_sales_yesterday: f64,
    view_count_7d: u32,
    add_to_cart_7d: u32,
    favorites_7d: u32,
    avg_rating: f64,
    review_count: u32,
    stock_out_days_last_30d: i32,
    campaign_flag: bool,
}

impl ProductBuilder {
    pub fn new(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            product_name: format!("商品 {}", sku),
            category: "kitchen".to_string(),
            tip: 1,
            price: 100.0,
            margin_pct: 40.0,
            stock_akyazi: 20.0,
            stock_ana_depo: 60.0,
            stock_oms_total: 20.0,
            daily_sales_avg_30d: 5.0,
            daily_sales_avg_7d: 5.0,
            daily_sales_yesterday: 5.0,
            view_count_7d: 500,
            add_to_cart_7d: 50,
            favorites_7d: 20,
            avg_rating: 4.5,
            review_count: 100,
            stock_out_days_last_30d: 0,
            campaign_flag: false,
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn stocks(mut self, akyazi: f64, ana_depo: f64, oms: f64) -> Self {
        self.stock_akyazi = akyazi;
        self.stock_ana_depo = ana_depo;
        self.stock_oms_total = oms;
        self
    }

    pub fn sales(mut self, avg_30d: f64, avg_7d: f64, yesterday: f64) -> Self {
        self.daily_sales_avg_30d = avg_30d;
        self.daily_sales_avg_7d = avg_7d;
        self.daily_sales_yesterday = yesterday;
        self
    }

    pub fn engagement(mut self, views: u32, carts: u32, favorites: u32) -> Self {
        self.view_count_7d = views;
        self.add_to_cart_7d = carts;
        self.favorites_7d = favorites;
        self
    }

    pub fn rating(mut self, avg_rating: f64, review_count: u32) -> Self {
        self.avg_rating = avg_rating;
        self.review_count = review_count;
        self
    }

    pub fn stockout_days(mut self, days: i32) -> Self {
        self.stock_out_days_last_30d = days;
        self
    }

    pub fn campaign(mut self, flag: bool) -> Self {
        self.campaign_flag = flag;
        self
    }

    pub fn build(self) -> ProductRecord {
        let total_stock = self.stock_akyazi + self.stock_ana_depo + self.stock_oms_total;
        ProductRecord {
            sku: self.sku,
            product_name: self.product_name,
            category: self.category,
            tip: self.tip,
            price: self.price,
            margin_pct: self.margin_pct,
            stock_akyazi: self.stock_akyazi,
            stock_ana_depo: self.stock_ana_depo,
            stock_oms_total: self.stock_oms_total,
            total_stock,
            daily_sales_avg_30d: self.daily_sales_avg_30d,
            daily_sales_avg_7d: self.daily_sales_avg_7d,
            daily_sales_yesterday: self.daily_sales_yesterday,
            view_count_7d: self.view_count_7d,
            add_to_cart_7d: self.add_to_cart_7d,
            favorites_7d: self.favorites_7d,
            avg_rating: self.avg_rating,
            review_count: self.review_count,
            stock_out_days_last_30d: self.stock_out_days_last_30d,
            campaign_flag: self.campaign_flag,
        }
    }
}

/// 覆盖各生命周期段位的混合商品表
pub fn sample_catalog() -> Vec<ProductRecord> {
    vec![
        // HOT: 高流速 + 高趋势 + 绝对销量
        ProductBuilder::new("SKU-HOT")
            .sales(10.0, 20.0, 30.0)
            .stocks(20.0, 200.0, 30.0)
            .build(),
        // RISING_STAR: 中流速 + 高互动
        ProductBuilder::new("SKU-RS")
            .sales(5.0, 7.0, 9.0)
            .engagement(1000, 80, 30)
            .stocks(30.0, 100.0, 20.0)
            .build(),
        // STEADY: 流速平稳
        ProductBuilder::new("SKU-STEADY")
            .sales(6.0, 6.0, 6.0)
            .stocks(40.0, 80.0, 30.0)
            .build(),
        // SLOW: 低销量
        ProductBuilder::new("SKU-SLOW")
            .category("textile")
            .sales(4.0, 3.0, 3.0)
            .stocks(80.0, 120.0, 50.0)
            .build(),
        // DYING: 流速崩塌
        ProductBuilder::new("SKU-DYING")
            .category("textile")
            .sales(10.0, 1.0, 0.5)
            .stocks(100.0, 150.0, 80.0)
            .build(),
    ]
}
