#[cfg(test)]
pub const POST_DATA: &str = "---
layout: post
title: \"What I learned after 20+ years of software development\"
date: 2021-05-01 -0800
comments: true
disqus_identifier: 18704
categories: [code]
---

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

Disclaimer: I don't think I am a great engineer.
";
